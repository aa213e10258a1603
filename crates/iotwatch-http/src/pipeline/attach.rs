//! Attach the session's bearer token to an outbound request.

use iotwatch_core::SessionContext;
use url::Url;

use crate::http::OutboundRequest;

pub(crate) const AUTHORIZATION: &str = "Authorization";

/// Add `Authorization: Bearer <token>` when a session is active.
///
/// The token is only sent to the origin of `base_url`; an absolute URL on any
/// other host goes out without it. Nothing else about the request is changed.
pub fn attach_credential(
    mut request: OutboundRequest,
    session: &SessionContext,
    base_url: &str,
) -> OutboundRequest {
    let Some(credential) = session.credential() else {
        return request;
    };
    let same_origin = Url::parse(base_url).is_ok_and(|base| base.origin() == request.url.origin());
    if same_origin {
        request.set_header(AUTHORIZATION, credential.bearer());
    } else {
        tracing::debug!(url = %request.url, "Withholding credential from foreign origin");
    }
    request
}
