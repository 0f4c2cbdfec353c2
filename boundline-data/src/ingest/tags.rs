//! Tag lookup for OSM elements.

/// Value of the first tag whose key equals `key`.
pub(super) fn find_tag<'a, T>(tags: T, key: &str) -> Option<&'a str>
where
    T: IntoIterator<Item = (&'a str, &'a str)>,
{
    tags.into_iter()
        .find_map(|(candidate, value)| (candidate == key).then_some(value))
}
