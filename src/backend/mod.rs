pub mod chat;
mod extractor;
mod params;
mod payload;
mod recover;
mod transport;

pub use chat::{ChatExtraction, ChatParams, Message, extract_chat};
pub use extractor::Extractor;
pub use params::{Adapter, ClientParams, DEFAULT_ENDPOINT};
pub use recover::recover_json;
pub use transport::{HttpTransport, Transport};
