pub mod context;
pub mod gemini;
