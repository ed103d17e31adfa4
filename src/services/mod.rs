pub mod ai;
pub mod analysis;
pub mod dates;
pub mod merge;
pub mod rules;
pub mod session;
pub mod validator;
