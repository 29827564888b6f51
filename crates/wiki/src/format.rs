use {chrono::NaiveDate, superform_publishing::Publication};

const RULE: &str = "-----";

/// PmWiki markup for `publication`, dated `date`.
///
/// Heading, byline, a horizontal rule and the body, followed by a ruled link
/// and image section when those are present.
pub fn make_text(publication: &Publication, date: NaiveDate) -> String {
    let mut text = format!(
        "!! {}\nPar {} Publié le {}\n\n{RULE}\n{}\n\n",
        publication.title,
        publication.author(),
        date.format("%d/%m/%Y"),
        publication.description,
    );
    if let Some(link) = publication.link() {
        text.push_str(&format!("{RULE}[[{link}]]\n"));
    }
    if let Some(image) = publication.image() {
        text.push_str(&format!("{RULE}\n{image}\n"));
    }
    text
}

/// [`make_text`] dated with the local calendar day.
pub fn make_text_now(publication: &Publication) -> String {
    make_text(publication, chrono::Local::now().date_naive())
}

/// Page a publication is written to: `<group>.<title without spaces>`.
pub fn page_name(group: &str, title: &str) -> String {
    format!("{group}.{}", title.replace(' ', ""))
}
