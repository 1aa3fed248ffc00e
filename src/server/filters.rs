use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use http::header::{AUTHORIZATION, LOCATION, WWW_AUTHENTICATE};
use http::{HeaderValue, Request, Response, StatusCode};

/// Response body passed through the filter chain
pub type Body = Vec<u8>;

/// A synchronous HTTP handler. Filters wrap one of these and either
/// delegate to it or answer on their own.
pub trait Handler: Send + Sync {
    fn handle(&self, req: &Request<()>) -> Response<Body>;
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle(&self, req: &Request<()>) -> Response<Body> {
        (**self).handle(req)
    }
}

/// Guards a handler with HTTP Basic Authentication against a single
/// configured credential pair.
///
/// The expected `Authorization` value is precomputed at construction, so
/// each request is a single header comparison. Anything short of an exact
/// match is a denial: missing header, wrong scheme, malformed base64 and
/// wrong credentials all get the same 401.
pub struct BasicAuth<H> {
    expected: String,
    next: H,
}

impl<H: Handler> BasicAuth<H> {
    pub fn new(username: &str, password: &str, next: H) -> Self {
        let encoded = BASE64.encode(format!("{}:{}", username, password));
        Self {
            expected: format!("Basic {}", encoded),
            next,
        }
    }
}

impl<H: Handler> Handler for BasicAuth<H> {
    fn handle(&self, req: &Request<()>) -> Response<Body> {
        let authorized = req
            .headers()
            .get(AUTHORIZATION)
            .map(|value| value.as_bytes() == self.expected.as_bytes())
            .unwrap_or(false);

        if !authorized {
            return Response::builder()
                .status(StatusCode::UNAUTHORIZED)
                .header(WWW_AUTHENTICATE, "Basic")
                .body(Body::new())
                .expect("static response parts");
        }

        self.next.handle(req)
    }
}

/// Redirects plaintext traffic to the canonical HTTPS URL.
///
/// Reads the `X-Forwarded-Proto` header set by the fronting proxy. Only an
/// exact `https` passes through; plaintext, absent and malformed values all
/// redirect.
pub struct SslRequired<H> {
    redirect_to: HeaderValue,
    next: H,
}

impl<H: Handler> SslRequired<H> {
    pub fn new(redirect_to: HeaderValue, next: H) -> Self {
        Self { redirect_to, next }
    }
}

impl<H: Handler> Handler for SslRequired<H> {
    fn handle(&self, req: &Request<()>) -> Response<Body> {
        let secure = req
            .headers()
            .get("x-forwarded-proto")
            .map(|value| value.as_bytes() == b"https")
            .unwrap_or(false);

        if !secure {
            return Response::builder()
                .status(StatusCode::MOVED_PERMANENTLY)
                .header(LOCATION, self.redirect_to.clone())
                .body(Body::new())
                .expect("static response parts");
        }

        self.next.handle(req)
    }
}
