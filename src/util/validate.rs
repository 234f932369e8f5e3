// shared with build.rs, so this file may only depend on std

pub(crate) const MEDIA_TYPE_SEPARATOR: char = '/';
pub(crate) const SUFFIX_SEPARATOR: char = '+';

// RFC 6838 section 4.2
pub(crate) const RESTRICTED_NAME_MAX_LEN: usize = 127;
const RESTRICTED_NAME_EXTRA_CHARS: &[char] = &['!', '#', '$', '&', '-', '^', '_', '.', '+'];

// upstream carries a handful of extensions such as `n-gage` and `fe_launch`
const EXTENSION_INNER_CHARS: &[char] = &['-', '_'];

pub(crate) fn validate_media_type(media_type: impl AsRef<str>) -> Result<(), String> {
    let media_type = media_type.as_ref();

    let Some((top_level, subtype)) = media_type.split_once(MEDIA_TYPE_SEPARATOR) else {
        return Err(format!("Media type '{media_type}' is missing a subtype"));
    };

    validate_restricted_name(media_type, top_level)?;
    validate_restricted_name(media_type, subtype)?;

    if top_level.contains(SUFFIX_SEPARATOR) {
        return Err(format!("Media type '{media_type}' has a suffix on its top-level type"));
    }

    Ok(())
}

fn validate_restricted_name(media_type: &str, name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!("Media type '{media_type}' has an empty component"));
    }

    if name.len() > RESTRICTED_NAME_MAX_LEN {
        return Err(format!("Media type '{media_type}' has a component that is too long"));
    }

    for (i, c) in name.chars().enumerate() {
        let valid = c.is_ascii_digit()
            || c.is_ascii_lowercase()
            || (i > 0 && RESTRICTED_NAME_EXTRA_CHARS.contains(&c));
        if !valid {
            return Err(format!("Media type '{media_type}' contains invalid character '{c}'"));
        }
    }

    Ok(())
}

pub(crate) fn validate_extension(extension: impl AsRef<str>) -> Result<(), String> {
    let extension = extension.as_ref();

    if extension.is_empty() {
        return Err("Extension cannot be empty".to_owned());
    }

    let last = extension.len() - 1;
    for (i, c) in extension.char_indices() {
        let valid = c.is_ascii_digit()
            || c.is_ascii_lowercase()
            || (i > 0 && i < last && EXTENSION_INNER_CHARS.contains(&c));
        if !valid {
            return Err(format!("Extension '{extension}' contains invalid character '{c}'"));
        }
    }

    Ok(())
}
