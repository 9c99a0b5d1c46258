//! The concrete domain agents

pub mod customer_service;
pub mod data_analyst;
pub mod learning_assistant;
pub mod weather;

pub use customer_service::CustomerServiceAgent;
pub use data_analyst::DataAnalystAgent;
pub use learning_assistant::LearningAssistantAgent;
pub use weather::WeatherAgent;
