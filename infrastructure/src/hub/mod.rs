//! Hugging Face Inference API adapter
//!
//! Implements [`ModelHub`](assistant_application::ModelHub) over HTTP.
//! Loading a handle checks the model against the hub metadata endpoint;
//! every inference call is a single `POST {inference_url}/models/{id}`.

pub mod error;
pub mod gateway;
pub mod handles;
pub mod protocol;
