use crate::error::CodecError;

/// Convert a 1-based column index to its bijective base-26 name (1 -> A, 27 -> AA).
pub fn index_to_col_name(index: i64, uppercase: bool) -> Result<String, CodecError> {
    if index < 1 {
        return Err(CodecError::InvalidIndex(index));
    }

    let mut col_name = String::new();
    let mut n = index;

    while n > 0 {
        let remainder = (n - 1) % 26;
        col_name.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }

    if !uppercase {
        col_name.make_ascii_lowercase();
    }

    Ok(col_name)
}

/// Convert a column name (any case) back to its 1-based index.
pub fn col_name_to_index(name: &str) -> Result<i64, CodecError> {
    let invalid = || CodecError::InvalidLetter(name.to_string());

    if name.is_empty() {
        return Err(invalid());
    }

    let mut result: i64 = 0;

    for c in name.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(invalid());
        }

        let val = (c.to_ascii_uppercase() as u8 - b'A' + 1) as i64;
        result = result
            .checked_mul(26)
            .and_then(|r| r.checked_add(val))
            .ok_or_else(invalid)?;
    }

    Ok(result)
}
