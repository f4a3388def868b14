//! Concrete backend adapters.
//!
//! Each adapter implements [`ChatBackend`](crate::llms::base_backend::ChatBackend)
//! and owns the wire protocol, credentials, and timeout policy of its
//! backend. The engine never sees anything below the trait.
//!
//! | Backend | Module | Protocol |
//! |---------|--------|----------|
//! | Hosted chat-completions API | [`openai`] | `POST /v1/chat/completions` |
//! | Local model runner | [`ollama`] | `POST /api/chat` |

pub mod ollama;
pub mod openai;
