//! The send loop.
//!
//! One pass of the loop is: merge stored cookies into the request, run the
//! request listeners, transmit, persist response cookies, run the response
//! listeners, then either finish, resend (retry) or follow a redirect. Retries
//! and redirects go back to the top of the loop instead of recursing, and the
//! retry counter starts over on every redirect hop.

use std::sync::PoisonError;

use crate::client::redirect::resolve_location;
use crate::client::{Client, Outcome};
use crate::cookies::site_of;
use crate::errors::ClientError;
use crate::listeners::{Cancellation, Message, MessageKind};
use crate::net::transport::WireRequest;
use crate::net::{Request, Response};

/// What the listeners decided for one message.
enum Interception {
    Proceed,
    Retry,
    Cancel(Cancellation),
}

impl Client {
    /// Runs the full pipeline for `request`.
    ///
    /// Returns [`Outcome::Cancelled`] when a listener cancels, and an error when
    /// the URL is malformed, the transport fails or a configured retry or
    /// redirect cap is exceeded.
    pub fn execute(&self, request: Request) -> Result<Outcome, ClientError> {
        let mut request = request;
        let mut retries = 0usize;
        let mut hops = 0usize;

        loop {
            let site = site_of(&request.url)?;

            let mut cookies = self.cookie_store.get(&site);
            cookies.append(&mut request.cookies);
            request.cookies = cookies;

            if let Interception::Cancel(cancellation) = self.intercept(&request) {
                log::debug!("{}", cancellation);
                return Ok(Outcome::Cancelled(cancellation));
            }

            let response = self.transmit(&request, &site)?;

            match self.intercept(&response) {
                Interception::Cancel(cancellation) => {
                    log::debug!("{}", cancellation);
                    return Ok(Outcome::Cancelled(cancellation));
                }
                Interception::Retry => {
                    retries += 1;
                    if let Some(max) = self.config.max_retries {
                        if retries > max {
                            log::warn!("giving up on {} after {} retries", request.url, max);
                            return Err(ClientError::RetryLimit(max));
                        }
                    }
                    log::debug!("retrying {} (attempt {})", request.url, retries + 1);
                    continue;
                }
                Interception::Proceed => {}
            }

            if !(request.redirects && response.is_redirect()) {
                return Ok(Outcome::Response(response));
            }

            let target = match response.location().map(str::trim) {
                Some(location) if !location.is_empty() => resolve_location(&request.url, location),
                _ => {
                    log::debug!("{} from {} has no location", response.status, response.url);
                    return Ok(Outcome::Response(response));
                }
            };

            hops += 1;
            if let Some(max) = self.config.max_redirects {
                if hops > max {
                    log::warn!("too many redirects from {}", request.url);
                    return Err(ClientError::RedirectLimit(max));
                }
            }

            log::debug!("redirect {} -> {}", request.url, target);
            request = Request::follow(target, &request);
            retries = 0;
        }
    }

    /// Runs every qualifying listener for `message`, in registration order.
    ///
    /// The qualifying set is copied out before any action runs. The first
    /// listener with `cancel` set stops the pass without running its action.
    fn intercept<M: Message>(&self, message: &M) -> Interception {
        let qualifying = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .qualifying(message);

        let mut retry = false;
        for listener in &qualifying {
            if listener.cancel {
                return Interception::Cancel(Cancellation::new(listener, message));
            }
            log::trace!("running listener {} ('{}')", listener.id, listener.tag);
            listener.run(message);
            retry |= listener.retry_after_action;
        }

        // Note: retry is only meaningful once a response exists
        if retry && M::KIND == MessageKind::Response {
            Interception::Retry
        } else {
            Interception::Proceed
        }
    }

    fn transmit(&self, request: &Request, site: &str) -> Result<Response, ClientError> {
        let wire = WireRequest::assemble(request, &self.config.user_agent);
        log::debug!("{} {}", wire.method, wire.url);

        let raw = self.transport.execute(&wire).map_err(|e| {
            log::debug!("{} {} failed: {}", wire.method, wire.url, e);
            e
        })?;
        let response = Response::from_raw(raw);
        log::debug!("{} {} -> {}", wire.method, wire.url, response.status);

        self.persist_cookies(site, &response);
        Ok(response)
    }

    fn persist_cookies(&self, site: &str, response: &Response) {
        let updates = response.cookie_updates();
        if !updates.set.is_empty() {
            self.cookie_store.set(site, &updates.set);
        }
        if !updates.removed.is_empty() {
            self.cookie_store.remove(site, &updates.removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::cookies::{CookieStore, CookieStoreHandle, Cookies, InMemoryCookieStore};
    use crate::listeners::Listener;
    use crate::net::Method;
    use crate::test_utils::{raw, ScriptedTransport};

    use super::*;

    fn client_with(transport: &Arc<ScriptedTransport>, store: &Arc<InMemoryCookieStore>) -> Client {
        let store: CookieStoreHandle = store.clone();
        Client::builder()
            .user_agent("test-agent")
            .cookie_store(store)
            .transport(transport.clone())
            .build()
    }

    fn ok(url: &str) -> crate::net::transport::RawResponse {
        raw(200, url, &[], "ok")
    }

    fn cookies(pairs: &[(&str, &str)]) -> Cookies {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn request_cookies_win_over_stored_ones() {
        let transport = Arc::new(ScriptedTransport::replying(vec![ok("http://example.com/")]));
        let store = Arc::new(InMemoryCookieStore::new());
        store.set("example.com", &cookies(&[("a", "stored"), ("b", "stored")]));
        let client = client_with(&transport, &store);

        let request = Request::builder("http://Example.com/").cookie("b", "mine").build();
        let response = client.send(request).unwrap();

        assert_eq!(response.status, 200);
        let sent = transport.sent();
        assert_eq!(sent[0].header("cookie"), Some("a=stored; b=mine"));
        assert_eq!(sent[0].header("user-agent"), Some("test-agent"));
    }

    #[test]
    fn unqualified_listeners_do_nothing() {
        let transport = Arc::new(ScriptedTransport::replying(vec![ok("http://example.com/")]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = client_with(&transport, &store);
        client.listeners().write().unwrap().add(
            Listener::<Request>::new()
                .when(|_: &Request| false)
                .cancel(true),
        );
        client.listeners().write().unwrap().add(
            Listener::<Response>::new()
                .when(|r: &Response| r.status == 500)
                .retry_after_action(true),
        );

        let outcome = client.execute(Request::get("http://example.com/")).unwrap();
        assert!(!outcome.is_cancelled());
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn request_cancel_skips_transport_and_later_listeners() {
        let transport = Arc::new(ScriptedTransport::replying(vec![ok("http://example.com/")]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = client_with(&transport, &store);

        let ran = Arc::new(AtomicUsize::new(0));
        let first = ran.clone();
        let later = ran.clone();
        {
            let mut registry = client.listeners().write().unwrap();
            registry.add(Listener::<Request>::new().action(move |_: &Request| {
                first.fetch_add(1, Ordering::SeqCst);
            }));
            registry.add(Listener::<Request>::new().tag("deny").cancel(true));
            registry.add(Listener::<Request>::new().action(move |_: &Request| {
                later.fetch_add(10, Ordering::SeqCst);
            }));
        }

        match client.execute(Request::get("http://example.com/blocked")).unwrap() {
            Outcome::Cancelled(cancellation) => {
                assert_eq!(cancellation.tag, "deny");
                assert_eq!(cancellation.message.kind, MessageKind::Request);
                assert_eq!(cancellation.message.url, "http://example.com/blocked");
            }
            Outcome::Response(_) => panic!("request should have been cancelled"),
        }
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn send_reports_cancellation_as_error() {
        let transport = Arc::new(ScriptedTransport::replying(vec![raw(403, "http://example.com/", &[], "")]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = client_with(&transport, &store);
        client.listeners().write().unwrap().add(
            Listener::<Response>::new()
                .tag("forbidden")
                .when(|r: &Response| r.status == 403)
                .cancel(true),
        );

        let err = client.send(Request::get("http://example.com/")).unwrap_err();
        let cancellation = err.cancellation().unwrap();
        assert_eq!(cancellation.tag, "forbidden");
        assert_eq!(cancellation.message.status, Some(403));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn retry_resends_the_same_request_once() {
        let transport = Arc::new(ScriptedTransport::replying(vec![
            raw(503, "http://example.com/", &[], "busy"),
            ok("http://example.com/"),
        ]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = client_with(&transport, &store);
        client.listeners().write().unwrap().add(
            Listener::<Response>::new()
                .when(|r: &Response| r.status == 503)
                .retry_after_action(true),
        );

        let request = Request::builder("http://example.com/")
            .method(Method::Post)
            .header("X-Id", "7")
            .build();
        let response = client.send(request).unwrap();

        assert_eq!(response.status, 200);
        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
    }

    #[test]
    fn retry_without_cap_runs_until_condition_fails() {
        let transport = Arc::new(ScriptedTransport::replying(vec![ok("http://example.com/")]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = client_with(&transport, &store);

        let passes = Arc::new(AtomicUsize::new(0));
        let counted = passes.clone();
        let seen = passes.clone();
        client.listeners().write().unwrap().add(
            Listener::<Response>::new()
                .when(move |_: &Response| seen.load(Ordering::SeqCst) < 5)
                .action(move |_: &Response| {
                    counted.fetch_add(1, Ordering::SeqCst);
                })
                .retry_after_action(true),
        );

        client.send(Request::get("http://example.com/")).unwrap();
        assert_eq!(passes.load(Ordering::SeqCst), 5);
        assert_eq!(transport.calls(), 6);
    }

    #[test]
    fn retry_cap_is_enforced() {
        let transport = Arc::new(ScriptedTransport::replying(vec![ok("http://example.com/")]));
        let client = Client::builder()
            .cookie_store(Arc::new(InMemoryCookieStore::new()))
            .transport(transport.clone())
            .max_retries(2)
            .build();
        client
            .listeners()
            .write()
            .unwrap()
            .add(Listener::<Response>::new().retry_after_action(true));

        let err = client.send(Request::get("http://example.com/")).unwrap_err();
        assert!(matches!(err, ClientError::RetryLimit(2)));
        assert_eq!(transport.calls(), 3);
    }

    #[test]
    fn request_listener_retry_flag_is_ignored() {
        let transport = Arc::new(ScriptedTransport::replying(vec![ok("http://example.com/")]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = client_with(&transport, &store);
        client
            .listeners()
            .write()
            .unwrap()
            .add(Listener::<Request>::new().retry_after_action(true));

        client.send(Request::get("http://example.com/")).unwrap();
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn redirect_follows_location_with_cookies() {
        let transport = Arc::new(ScriptedTransport::replying(vec![
            raw(
                302,
                "http://example.com/old/path",
                &[("Location", "/new/path"), ("Set-Cookie", "sid=abc; Path=/")],
                "",
            ),
            ok("http://example.com/old/new/path"),
        ]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = client_with(&transport, &store);

        let request = Request::builder("http://example.com/old/path")
            .method(Method::Post)
            .cookie("c", "1")
            .body(crate::net::Body::text("payload"))
            .timeout(std::time::Duration::from_secs(3))
            .build();
        let response = client.send(request).unwrap();

        assert_eq!(response.status, 200);
        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].url, "http://example.com/old/new/path");
        assert_eq!(sent[1].method, Method::Get);
        assert!(sent[1].body.is_none());
        assert_eq!(sent[1].timeout, std::time::Duration::from_secs(3));
        assert_eq!(sent[1].header("cookie"), Some("c=1; sid=abc"));
    }

    #[test]
    fn redirects_disabled_returns_the_3xx() {
        let transport = Arc::new(ScriptedTransport::replying(vec![raw(
            301,
            "http://example.com/",
            &[("location", "http://example.com/elsewhere")],
            "",
        )]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = client_with(&transport, &store);

        let request = Request::builder("http://example.com/").redirects(false).build();
        let response = client.send(request).unwrap();
        assert_eq!(response.status, 301);
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn blank_location_is_terminal() {
        let transport = Arc::new(ScriptedTransport::replying(vec![
            raw(302, "http://example.com/", &[("Location", "  ")], ""),
            raw(304, "http://example.com/", &[], ""),
        ]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = client_with(&transport, &store);

        assert_eq!(client.send(Request::get("http://example.com/")).unwrap().status, 302);

        let response = client.send(Request::get("http://example.com/")).unwrap();
        assert_eq!(response.status, 304);
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn redirect_cap_is_enforced() {
        let transport = Arc::new(ScriptedTransport::replying(vec![raw(
            302,
            "http://example.com/loop",
            &[("Location", "http://example.com/loop")],
            "",
        )]));
        let client = Client::builder()
            .cookie_store(Arc::new(InMemoryCookieStore::new()))
            .transport(transport.clone())
            .max_redirects(3)
            .build();

        let err = client.send(Request::get("http://example.com/loop")).unwrap_err();
        assert!(matches!(err, ClientError::RedirectLimit(3)));
        assert_eq!(transport.calls(), 4);
    }

    #[test]
    fn retry_counter_resets_after_redirect() {
        let transport = Arc::new(ScriptedTransport::replying(vec![
            raw(503, "http://example.com/a", &[], ""),
            raw(302, "http://example.com/a", &[("Location", "http://example.com/b")], ""),
            raw(503, "http://example.com/b", &[], ""),
            ok("http://example.com/b"),
        ]));
        let client = Client::builder()
            .cookie_store(Arc::new(InMemoryCookieStore::new()))
            .transport(transport.clone())
            .max_retries(1)
            .build();
        client.listeners().write().unwrap().add(
            Listener::<Response>::new()
                .when(|r: &Response| r.status == 503)
                .retry_after_action(true),
        );

        let response = client.send(Request::get("http://example.com/a")).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(transport.calls(), 4);
    }

    #[test]
    fn response_cookies_are_persisted_and_removed() {
        let transport = Arc::new(ScriptedTransport::replying(vec![raw(
            200,
            "http://example.com/",
            &[("Set-Cookie", "a=1; Path=/"), ("Set-Cookie", "b=; Max-Age=0")],
            "",
        )]));
        let store = Arc::new(InMemoryCookieStore::new());
        store.set("example.com", &cookies(&[("b", "old"), ("keep", "yes")]));
        let client = client_with(&transport, &store);

        client.send(Request::get("http://example.com/")).unwrap();

        assert_eq!(
            store.get("example.com"),
            cookies(&[("a", "1"), ("keep", "yes")])
        );
    }

    #[test]
    fn listeners_may_edit_the_registry() {
        let transport = Arc::new(ScriptedTransport::replying(vec![ok("http://example.com/")]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = Arc::new(client_with(&transport, &store));

        let handle = client.listeners().clone();
        client.listeners().write().unwrap().add(
            Listener::<Request>::new()
                .tag("once")
                .action(move |_: &Request| {
                    handle.write().unwrap().remove_tagged("once");
                }),
        );

        client.send(Request::get("http://example.com/")).unwrap();
        assert!(client.listeners().read().unwrap().is_empty());
    }

    #[test]
    fn transport_errors_propagate() {
        let transport = Arc::new(ScriptedTransport::new(vec![Err(ClientError::ConnectionFailed(
            "refused".to_string(),
        ))]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = client_with(&transport, &store);

        let err = client.send(Request::get("http://example.com/")).unwrap_err();
        assert!(matches!(err, ClientError::ConnectionFailed(_)));
    }

    #[test]
    fn malformed_url_fails_before_sending() {
        let transport = Arc::new(ScriptedTransport::replying(vec![ok("http://example.com/")]));
        let store = Arc::new(InMemoryCookieStore::new());
        let client = client_with(&transport, &store);

        let err = client.send(Request::get("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::MalformedUrl(_)));
        assert_eq!(transport.calls(), 0);
    }
}
