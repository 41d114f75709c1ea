use crate::types::RequestMeta;
use http::Extensions;
use percent_encoding::percent_decode_str;

/// Decodes the request path before it's matched against the route tree. Invalid UTF-8 sequences
/// are replaced, not rejected.
pub(crate) fn percent_decode_request_path(val: &str) -> String {
    percent_decode_str(val).decode_utf8_lossy().into_owned()
}

pub(crate) fn update_req_meta_in_extensions(ext: &mut Extensions, req_meta: RequestMeta) {
    if let Some(existing_req_meta) = ext.get_mut::<RequestMeta>() {
        existing_req_meta.extend(req_meta);
    } else {
        ext.insert(req_meta);
    }
}

pub(crate) fn req_meta(ext: &Extensions) -> Option<&RequestMeta> {
    ext.get::<RequestMeta>()
}
