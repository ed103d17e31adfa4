use chrono::NaiveDate;

use crate::models::{ConversationEntry, ExtractedIncident, IncidentRecord};
use crate::services::dates::DateFormat;

const EXTRACTION_PROMPT: &str = r#"Analiza el siguiente texto y extrae las siguientes variables en formato JSON:
- date: Fecha en formato {FORMAT}. Si el usuario dice "hoy", usa la fecha actual. Si dice "ayer", usa la fecha de ayer.
- location: Lugar del suceso (dirección o "domicilio titular").
- description: Resumen breve en una oración.
- injuries: true o false (si hay heridos). Si el usuario menciona una caída, asume que hay heridos a menos que diga explícitamente "no hubo heridos".
- owner: true o false (si el usuario es el titular del objeto afectado).
- complete: true si la información es suficiente, false si falta algo.
- question: Si falta información, haz una pregunta específica para completar el JSON, si no, deja ""

Usa null para cualquier dato que no conozcas. Devuelve SOLO el objeto JSON, sin explicaciones."#;

pub fn build_prompt(
    text: &str,
    conversation: &[ConversationEntry],
    record: &IncidentRecord,
    today: NaiveDate,
    format: DateFormat,
) -> String {
    let mut prompt = EXTRACTION_PROMPT.replace("{FORMAT}", format.label());

    prompt.push_str(&format!("\n\nFecha actual: {}", format.format(today)));
    prompt.push_str(&format!(
        "\n\nDatos ya conocidos del suceso:\n{}",
        record.to_prompt()
    ));
    prompt.push_str(&format!("\n\nTexto del usuario: \"{text}\""));

    if !conversation.is_empty() {
        prompt.push_str("\n\nHistorial de la conversación:\n");
        for entry in conversation {
            prompt.push_str(&format!("{}: {}\n", entry.role.label(), entry.content));
        }
    }

    prompt
}

/// Removes markdown code fences the model likes to wrap its JSON in.
pub fn strip_code_fences(response: &str) -> String {
    response.replace("```json", "").replace("```", "").trim().to_string()
}

pub fn parse_extraction(response: &str) -> anyhow::Result<ExtractedIncident> {
    let cleaned = strip_code_fences(response);

    if let Ok(extracted) = parse_object(&cleaned) {
        return Ok(extracted);
    }

    // The model sometimes adds a sentence around the object
    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if start < end {
            return parse_object(&cleaned[start..=end]);
        }
    }

    anyhow::bail!("no JSON object in model reply")
}

fn parse_object(s: &str) -> anyhow::Result<ExtractedIncident> {
    let value: serde_json::Value = serde_json::from_str(s)?;
    if !value.is_object() {
        anyhow::bail!("model reply is JSON but not an object");
    }
    Ok(serde_json::from_value(value)?)
}
