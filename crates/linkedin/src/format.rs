use superform_publishing::Publication;

/// Share comment: title, body and link on separate lines. A missing link
/// leaves the last line empty.
pub fn format_comment(publication: &Publication) -> String {
    format!(
        "{}\n{}\n{}",
        publication.title,
        publication.description,
        publication.link().unwrap_or_default()
    )
}
