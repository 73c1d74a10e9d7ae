//! Quote-aware splitting of one logical line into field values

/// Split the exact byte span of one logical line into its field values.
///
/// Fields are separated by unquoted commas. Surrounding quotes are stripped
/// and a doubled quote inside a quoted field becomes one literal quote.
/// Carriage returns and newlines survive only inside quotes; the unquoted
/// line ending (CRLF or bare LF) is discarded. The final field is always
/// emitted, so a line ending in a comma produces a trailing empty field.
///
/// Splitting never fails: unbalanced quotes simply leave the toggle in
/// whatever state it ends in. Field bytes are converted with lossy UTF-8.
///
/// # Examples
///
/// ```
/// use csvseek::split_record;
///
/// assert_eq!(split_record(b"a,\"b,c\",d\n"), vec!["a", "b,c", "d"]);
/// ```
pub fn split_record(line: &[u8]) -> Vec<String> {
    let mut fields = Vec::new();
    let mut buf: Vec<u8> = Vec::with_capacity(32);
    let mut in_quotes = false;
    let mut prev_quote = false;

    for &byte in line {
        let after_quote = prev_quote;
        prev_quote = false;

        match byte {
            b'"' => {
                in_quotes = !in_quotes;
                // A quote that re-opens the field right after one closed it
                // is the second half of a doubled quote: keep one literal.
                if in_quotes && after_quote {
                    buf.push(b'"');
                }
                prev_quote = true;
            }
            b',' => {
                if in_quotes {
                    buf.push(byte);
                } else {
                    fields.push(String::from_utf8_lossy(&buf).into_owned());
                    buf.clear();
                }
            }
            b'\r' | b'\n' => {
                if in_quotes {
                    buf.push(byte);
                }
            }
            _ => buf.push(byte),
        }
    }

    fields.push(String::from_utf8_lossy(&buf).into_owned());
    fields
}
