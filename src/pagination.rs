//! Cursor-based pagination over the paged endpoints.
//!
//! The server answers paged requests with a payload plus opaque `previous`
//! and `next` urls. [wrap_paged] turns such a raw response into a [Paged]
//! value whose [PageCursor]s re-issue the fetch on demand and re-wrap the
//! result the same way, so a whole listing can be walked lazily in either
//! direction.

use crate::auth::Auth;
use crate::requests::Result;
use crate::MalClient;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use std::fmt;
use std::sync::Arc;

/// Raw `paging` object of a paged server response.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Paging {
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Wire shape of every paged endpoint response.
///
/// `R` is documented upstream to always be an array, but at least one
/// endpoint puts a single object in `data`, so no sequence shape is assumed
/// here.
#[derive(Deserialize, Debug, Clone)]
pub struct PagedResponse<R> {
    pub data: R,
    #[serde(default)]
    pub paging: Paging,
}

type Rewrap<T> =
    Arc<dyn Fn(MalClient, String) -> BoxFuture<'static, Result<Paged<T>>> + Send + Sync>;

/// One page of results.
///
/// `previous`/`next` are present exactly when the raw response carried the
/// corresponding cursor url. There is no terminal marker beyond their
/// absence.
pub struct Paged<T> {
    pub data: T,
    pub previous: Option<PageCursor<T>>,
    pub next: Option<PageCursor<T>>,
}

/// Deferred fetch of an adjacent page.
///
/// Holds only immutable data: the opaque cursor url, the [Auth] the original
/// request was made with and the payload mapping. The HTTP client is injected
/// at invocation time, so a cursor can outlive the client that produced it.
pub struct PageCursor<T> {
    url: String,
    rewrap: Rewrap<T>,
}

impl<T> PageCursor<T> {
    /// The cursor url, exactly as the server sent it
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs one authenticated GET against the cursor url and wraps the
    /// response into the next [Paged] value.
    ///
    /// Every invocation issues a fresh request: nothing is cached, and
    /// concurrent invocations of the same cursor are independent
    pub async fn fetch(&self, client: &MalClient) -> Result<Paged<T>> {
        (self.rewrap)(client.clone(), self.url.clone()).await
    }
}

impl<T> Clone for PageCursor<T> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            rewrap: Arc::clone(&self.rewrap),
        }
    }
}

impl<T> fmt::Debug for PageCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCursor")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl<T: fmt::Debug> fmt::Debug for Paged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paged")
            .field("data", &self.data)
            .field("previous", &self.previous)
            .field("next", &self.next)
            .finish()
    }
}

/// Wraps a raw paged response into a [Paged] value.
///
/// `map` converts the endpoint's raw payload shape into the caller-facing
/// one, typically unwrapping `{node: ...}` envelopes. The cursors capture
/// `map` and `auth` and apply this same wrapping recursively to whatever
/// they fetch.
pub fn wrap_paged<R, T, F>(raw: PagedResponse<R>, map: F, auth: Auth) -> Paged<T>
where
    R: DeserializeOwned + Send + 'static,
    T: Send + 'static,
    F: Fn(R) -> T + Clone + Send + Sync + 'static,
{
    let rewrap: Rewrap<T> = {
        let map = map.clone();

        Arc::new(move |client, url| {
            let map = map.clone();
            let auth = auth.clone();

            Box::pin(async move {
                let raw: PagedResponse<R> = client.get_url(&url, &auth).await?;

                Ok(wrap_paged(raw, map, auth))
            })
        })
    };

    let cursor = |url: Option<String>| {
        url.map(|url| PageCursor {
            url,
            rewrap: Arc::clone(&rewrap),
        })
    };

    Paged {
        data: map(raw.data),
        previous: cursor(raw.paging.previous),
        next: cursor(raw.paging.next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(
        data: Vec<&str>,
        previous: Option<&str>,
        next: Option<&str>,
    ) -> PagedResponse<Vec<String>> {
        PagedResponse {
            data: data.into_iter().map(str::to_owned).collect(),
            paging: Paging {
                previous: previous.map(str::to_owned),
                next: next.map(str::to_owned),
            },
        }
    }

    #[test]
    fn test_cursor_presence_mirrors_paging() {
        let page = wrap_paged(
            raw(vec!["x"], None, Some("http://example.com/page2")),
            |data| data,
            Auth::ClientId("id".to_owned()),
        );

        assert_eq!(page.data, vec!["x".to_owned()]);
        assert!(page.previous.is_none());

        let next = page.next.expect("next cursor should be present");
        assert_eq!(next.url(), "http://example.com/page2");
    }

    #[test]
    fn test_no_cursors_on_final_page() {
        let page = wrap_paged(
            raw(vec!["y"], None, None),
            |data| data,
            Auth::ClientId("id".to_owned()),
        );

        assert!(page.previous.is_none());
        assert!(page.next.is_none());
    }

    #[test]
    fn test_map_is_applied_to_data() {
        let page = wrap_paged(
            raw(vec!["a", "bb"], Some("http://example.com/page0"), None),
            |data: Vec<String>| data.into_iter().map(|s| s.len()).collect::<Vec<_>>(),
            Auth::ClientId("id".to_owned()),
        );

        assert_eq!(page.data, vec![1, 2]);
        assert!(page.previous.is_some());
    }

    #[test]
    fn test_missing_paging_object_means_no_cursors() {
        let raw: PagedResponse<Vec<u64>> = serde_json::from_str(r#"{"data": [1, 2]}"#).unwrap();

        assert!(raw.paging.previous.is_none());
        assert!(raw.paging.next.is_none());
    }

    #[test]
    fn test_single_object_payload_is_tolerated() {
        // one endpoint puts a bare object in `data` instead of an array
        #[derive(Deserialize, Debug, PartialEq)]
        struct Topic {
            title: String,
        }

        let raw: PagedResponse<Topic> =
            serde_json::from_str(r#"{"data": {"title": "t"}, "paging": {"next": "u"}}"#).unwrap();

        assert_eq!(raw.data, Topic { title: "t".to_owned() });
        assert_eq!(raw.paging.next.as_deref(), Some("u"));
    }
}
