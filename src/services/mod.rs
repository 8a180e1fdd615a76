pub mod chatbot;
pub mod conversation;
pub mod gemini;
pub mod upstream;
