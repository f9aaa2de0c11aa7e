//! Share URL construction.

use url::Url;

use crate::domain::IdeaId;

/// Build the canonical share link for an idea.
///
/// The result is always `<origin + path>?idea=<id>`: any query string or
/// fragment on the base URL is discarded first, which makes the operation
/// idempotent.
///
/// # Examples
/// ```
/// use backend::domain::{share_url, IdeaId};
/// use url::Url;
///
/// let base = Url::parse("https://ideas.example/explore?idea=7#top").unwrap();
/// let link = share_url(&base, IdeaId(42));
/// assert_eq!(link.as_str(), "https://ideas.example/explore?idea=42");
/// ```
#[must_use]
pub fn share_url(base: &Url, idea_id: IdeaId) -> Url {
    let mut link = base.clone();
    link.set_fragment(None);
    link.set_query(None);
    link.query_pairs_mut()
        .append_pair("idea", &idea_id.to_string());
    link
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://ideas.example/", "https://ideas.example/?idea=7")]
    #[case("https://ideas.example/explore", "https://ideas.example/explore?idea=7")]
    #[case(
        "https://ideas.example/explore?idea=3",
        "https://ideas.example/explore?idea=7"
    )]
    #[case(
        "https://ideas.example/explore?tags=ai&idea=3#cards",
        "https://ideas.example/explore?idea=7"
    )]
    fn always_appends_single_idea_parameter(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("valid base");
        assert_eq!(share_url(&base, IdeaId(7)).as_str(), expected);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let base = Url::parse("https://ideas.example/explore").expect("valid base");
        let once = share_url(&base, IdeaId(7));
        let twice = share_url(&once, IdeaId(7));
        assert_eq!(once, twice);
    }
}
