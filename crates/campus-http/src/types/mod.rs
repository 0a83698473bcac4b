pub mod envelope;
pub mod request;
pub mod response;

pub use envelope::Envelope;
pub use request::ApiRequest;
pub use response::ApiResponse;
