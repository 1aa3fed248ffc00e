pub mod filters;

pub use filters::{BasicAuth, Body, Handler, SslRequired};

use std::io::Cursor;

use anyhow::{anyhow, Context, Result};
use http::header::{HeaderName, CONTENT_TYPE};
use http::{HeaderValue, Request, Response, StatusCode, Uri};
use octocrab::Octocrab;
use tokio::runtime::Handle;
use tracing::{error, info};

use crate::config::{Config, RepoConfig};
use crate::dashboard;
use crate::github;

/// Bind the configured address and serve the dashboard until the process
/// is killed. Every request runs through the filter chain; the loop itself
/// is synchronous, one request at a time.
pub fn serve(config: &Config, runtime: Handle, client: Octocrab) -> Result<()> {
    let handler = build_handler(config, runtime, client)?;

    let server = tiny_http::Server::http(&config.server.bind)
        .map_err(|e| anyhow!("Failed to bind {}: {}", config.server.bind, e))?;
    info!(bind = %config.server.bind, repos = config.repos.len(), "dashboard up");

    for request in server.incoming_requests() {
        let response = handler.handle(&to_http_request(&request));
        info!(
            method = %request.method(),
            url = request.url(),
            status = response.status().as_u16(),
            "request"
        );
        if let Err(e) = respond(request, response) {
            error!("failed to send response: {}", e);
        }
    }

    Ok(())
}

/// Assemble the filter chain around the dashboard handler. The forced-HTTPS
/// filter is installed only when a canonical URL is configured, so local
/// runs stay plain.
fn build_handler(config: &Config, runtime: Handle, client: Octocrab) -> Result<Box<dyn Handler>> {
    let dashboard = DashboardHandler {
        runtime,
        client,
        repos: config.repos.clone(),
    };

    let mut handler: Box<dyn Handler> = Box::new(BasicAuth::new(
        &config.auth.username,
        &config.auth.password,
        dashboard,
    ));

    if let Some(url) = &config.server.canonical_url {
        let location = HeaderValue::from_str(url)
            .with_context(|| format!("canonical_url is not a valid header value: {}", url))?;
        handler = Box::new(SslRequired::new(location, handler));
    }

    Ok(handler)
}

/// Innermost handler: fetch, sort and render the dashboard per request
struct DashboardHandler {
    runtime: Handle,
    client: Octocrab,
    repos: Vec<RepoConfig>,
}

impl Handler for DashboardHandler {
    fn handle(&self, req: &Request<()>) -> Response<Body> {
        if req.uri().path() != "/" {
            return plain_response(StatusCode::NOT_FOUND, "not found");
        }

        let fetched = self
            .runtime
            .block_on(github::fetch_open_prs(&self.client, &self.repos));
        let mut prs = match fetched {
            Ok(prs) => prs,
            Err(e) => {
                error!("fetch failed: {:#}", e);
                return plain_response(StatusCode::BAD_GATEWAY, "failed to fetch pull requests");
            }
        };

        // Oldest first, so the most neglected PRs sit at the top.
        prs.sort_by_key(|pr| pr.opened_at);

        let mut body = Body::new();
        if let Err(e) = dashboard::render(&mut body, &prs) {
            // Writes into a Vec cannot fail; reaching this is a bug.
            error!("render failed: {}", e);
            return plain_response(StatusCode::INTERNAL_SERVER_ERROR, "render failed");
        }

        Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "text/html; charset=utf-8")
            .body(body)
            .expect("static response parts")
    }
}

fn plain_response(status: StatusCode, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(message.as_bytes().to_vec())
        .expect("static response parts")
}

/// Translate a tiny_http request into the http-crate form the filter chain
/// consumes. Headers that fail to parse are dropped; the filters treat an
/// absent header as a denial anyway.
fn to_http_request(request: &tiny_http::Request) -> Request<()> {
    let mut req = Request::new(());
    *req.method_mut() = request
        .method()
        .to_string()
        .parse()
        .unwrap_or(http::Method::GET);
    *req.uri_mut() = request
        .url()
        .parse()
        .unwrap_or_else(|_| Uri::from_static("/"));

    let headers = req.headers_mut();
    for header in request.headers() {
        let name = HeaderName::from_bytes(header.field.as_str().as_bytes());
        let value = HeaderValue::from_bytes(header.value.as_bytes());
        if let (Ok(name), Ok(value)) = (name, value) {
            headers.append(name, value);
        }
    }

    req
}

/// Send an http-crate response back over the tiny_http connection
fn respond(request: tiny_http::Request, response: Response<Body>) -> std::io::Result<()> {
    let (parts, body) = response.into_parts();
    let data_length = Some(body.len());

    let mut out = tiny_http::Response::new(
        tiny_http::StatusCode(parts.status.as_u16()),
        Vec::new(),
        Cursor::new(body),
        data_length,
        None,
    );
    for (name, value) in &parts.headers {
        if let Ok(header) =
            tiny_http::Header::from_bytes(name.as_str().as_bytes(), value.as_bytes())
        {
            out.add_header(header);
        }
    }

    request.respond(out)
}
