pub mod model;
pub mod path;
pub mod request;
pub mod response;
