/// Produces the URL-safe identifier of a service title: lowercased, common
/// Latin diacritics folded to ASCII, everything else collapsed to single
/// dashes.
pub(crate) fn normalize_for_url(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());

    for ch in value.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if let Some(folded) = fold_diacritic(ch) {
            slug.push_str(folded);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.trim_end_matches('-').to_string()
}

fn fold_diacritic(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'ä' | 'à' | 'á' | 'â' => "a",
        'ö' | 'ò' | 'ó' | 'ô' => "o",
        'ü' | 'ù' | 'ú' | 'û' => "u",
        'ë' | 'è' | 'é' | 'ê' => "e",
        'ï' | 'ì' | 'í' | 'î' => "i",
        'ç' => "c",
        'ñ' => "n",
        'ß' => "ss",
        _ => return None,
    };

    Some(folded)
}
