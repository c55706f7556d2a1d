pub mod completion_llm;
pub mod db;
pub mod json_store;

pub use completion_llm::OpenAiCompletionAdapter;
pub use db::SqliteStore;
pub use json_store::JsonFileStore;
