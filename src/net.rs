//! Message model and transport: [`Request`], [`Response`], [`Headers`], bodies.

mod body;
pub mod content_type;
mod headers;
mod method;
mod request;
mod response;
pub mod transport;

pub use body::Body;
pub use body::FormBuilder;
pub use body::MultipartBuilder;
pub use body::ResponseBody;
pub use body::MULTIPART_BOUNDARY;
pub use headers::Headers;
pub use method::Method;
pub use request::Query;
pub use request::Request;
pub use request::RequestBuilder;
pub use response::CookieUpdates;
pub use response::Response;
