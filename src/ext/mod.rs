pub use self::request_ext::RequestExt;

mod request_ext;
