pub const SEP: &str = "|";

pub(crate) trait PayloadData {
    type Error;

    fn to_payload(&self) -> String;
    fn try_from_payload(payload: &str) -> Result<Self, Self::Error>
    where
        Self: Sized;
}

/// Describes how to parse and construct layout of callback payload
///
/// ```
/// # use bot_handlers::PayloadLayout;
/// let layout = PayloadLayout::new(3, Some(1));
///
/// let fields = vec!["view_key", "key|with|pipes", "text"];
///
/// let s = layout.make_payload(fields.clone()).unwrap();
/// assert_eq!(s, "view_key|key|with|pipes|text");
///
/// assert_eq!(layout.parse_payload(&s).unwrap(), fields);
/// ```
#[derive(Debug)]
pub struct PayloadLayout {
    /// Number of elements in payload, including the flag
    size: usize,
    /// Element which can contain separator, indexed from 0.
    /// It's not possible to parse payload with multiple such parts
    raw_element: Option<usize>,
}

impl PayloadLayout {
    pub const fn new(size: usize, raw_element: Option<usize>) -> Self {
        Self { size, raw_element }
    }
    pub fn make_payload(&self, elements: Vec<&str>) -> Result<String, PayloadParseError> {
        if elements.len() != self.size {
            return Err(PayloadParseError::InvalidSize);
        }
        Ok(elements.join(SEP))
    }
    pub fn parse_payload(&self, payload: &str) -> Result<Vec<String>, PayloadParseError> {
        let payload = payload
            .split(SEP)
            .map(ToOwned::to_owned)
            .collect::<Vec<String>>();

        let size = payload.len();
        if self.size > size {
            return Err(PayloadParseError::InvalidSize);
        }

        let res = match self.raw_element {
            Some(i) if self.size < size => {
                // [0]|[1]|[2]|[3]|[4], size 4, raw_element 1 -> [0], [1]|[2], [3], [4]
                // elements after raw one keep their place from the end
                let after_raw = self.size - i - 1;
                let raw_end = size - after_raw;
                let mut res = Vec::with_capacity(self.size);
                res.extend_from_slice(&payload[0..i]);
                res.push(payload[i..raw_end].join(SEP));
                res.extend_from_slice(&payload[raw_end..]);
                res
            }
            Some(_) | None => {
                if self.size < size {
                    return Err(PayloadParseError::InvalidSize);
                }
                payload
            }
        };
        Ok(res)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PayloadParseError {
    #[error("invalid payload size")]
    InvalidSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    use PayloadParseError::*;

    #[test]
    fn test_parse_payload_layout() {
        let size = 5;
        let layout = PayloadLayout::new(size, Some(2));
        let layout_simple = PayloadLayout::new(size, None);

        let table: &[(_, Result<&[_], PayloadParseError>)] = &[
            ("", Err(InvalidSize)),
            ("0", Err(InvalidSize)),
            ("0|1", Err(InvalidSize)),
            ("0|1|2", Err(InvalidSize)),
            ("0|1|2|3", Err(InvalidSize)),
            ("0|1|2|3|4", Ok(&["0", "1", "2", "3", "4"])),
            ("0|1|2|3|4|5", Ok(&["0", "1", "2|3", "4", "5"])),
            ("0|1|2|3|4|5|6", Ok(&["0", "1", "2|3|4", "5", "6"])),
        ];
        for (input, expected) in table {
            eprintln!("running for {input}");

            let expected = expected
                .as_ref()
                .map(|v| v.iter().map(|s| s.to_string()).collect::<Vec<_>>())
                .map_err(|e| *e);

            let res = layout.parse_payload(input);
            assert_eq!(res, expected);

            let res_simple = layout_simple.parse_payload(input);
            if res_simple.as_ref().is_ok_and(|v| v.len() == size) {
                assert_eq!(res_simple, expected);
            } else {
                assert_eq!(res_simple, Err(InvalidSize));
            }
        }
    }

    #[test]
    fn test_raw_element_positions() {
        let last = PayloadLayout::new(2, Some(1));
        assert_eq!(
            last.parse_payload("happ_tv|a|b|c"),
            Ok(vec!["happ_tv".to_string(), "a|b|c".to_string()])
        );

        let first = PayloadLayout::new(3, Some(0));
        assert_eq!(
            first.parse_payload("a|b|c|d"),
            Ok(vec!["a|b".to_string(), "c".to_string(), "d".to_string()])
        );

        assert_eq!(last.make_payload(vec!["only"]), Err(InvalidSize));
    }
}
