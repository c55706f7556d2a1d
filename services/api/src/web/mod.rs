pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod speech;
pub mod state;

// Re-export the handlers to make them easily accessible
// to the binary that builds the web server router.
pub use middleware::log_requests;
pub use rest::{
    generate_complaint_handler, get_complaint_handler, health_handler, list_complaints_handler,
    submit_complaint_handler, update_status_handler,
};
pub use speech::{speech_to_text_handler, text_to_speech_handler};
