//! Page token pagination for list endpoints

use crate::error::{Error, Result};
use futures::stream::{self, Stream, TryStreamExt};
use std::future::Future;
use tracing::debug;

/// A list response carrying an opaque continuation token
pub trait TokenPage {
    type Item;

    /// Token for the next page; `None` or empty when this is the last page
    fn next_page_token(&self) -> Option<&str>;

    fn into_items(self) -> Vec<Self::Item>;
}

/// Stream every item of a token-paginated listing
///
/// `fetch` receives `None` for the first page and the previous page's
/// `nextPageToken` afterwards. The next page is only requested once the
/// current page's items have been consumed, and the stream ends after a
/// page without a token or at the first error.
pub fn token_stream<P, F, Fut>(fetch: F) -> impl Stream<Item = Result<P::Item>>
where
    P: TokenPage,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    stream::try_unfold((fetch, Some(None::<String>)), |(mut fetch, cursor)| async move {
        let Some(token) = cursor else {
            return Ok::<_, Error>(None);
        };
        let page = fetch(token).await?;
        let next = page
            .next_page_token()
            .filter(|t| !t.is_empty())
            .map(|t| Some(t.to_string()));
        debug!(has_next = next.is_some(), "Fetched list page");
        Ok(Some((page.into_items(), (fetch, next))))
    })
    .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
    .try_flatten()
}
