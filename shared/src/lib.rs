use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// The fixed result slots the processing service fills, in wire order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, EnumIter, strum_macros::Display)]
pub enum ResultKind {
    #[strum(serialize = "Segmentation Result")]
    Segmentation,
    #[strum(serialize = "Detection Result")]
    Detection,
    #[strum(serialize = "Classification Result")]
    Classification,
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResponse {
    pub processed_results: Vec<String>,
}

/// One validated result image, kept as base64 so it can feed a data URL directly.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledImage {
    pub kind: ResultKind,
    pub png_base64: String,
}

#[derive(Debug, derive_more::Display)]
pub enum ResponseError {
    #[display(fmt = "expected {} result images, got {}", expected, actual)]
    UnexpectedCount { expected: usize, actual: usize },
    #[display(fmt = "result image {} is not valid base64: {}", index, source)]
    InvalidEncoding {
        index: usize,
        source: base64::DecodeError,
    },
}

impl ProcessingResponse {
    /// Checks the response against the wire contract and attaches the label
    /// each slot stands for. The service guarantees the ordering; anything
    /// that does not match it is refused rather than rendered as garbage.
    pub fn into_labeled(self) -> Result<Vec<LabeledImage>, ResponseError> {
        let expected = ResultKind::iter().count();
        let actual = self.processed_results.len();
        if actual != expected {
            return Err(ResponseError::UnexpectedCount { expected, actual });
        }

        self.processed_results
            .into_iter()
            .zip(ResultKind::iter())
            .enumerate()
            .map(|(index, (png_base64, kind))| {
                BASE64
                    .decode(png_base64.as_bytes())
                    .map_err(|source| ResponseError::InvalidEncoding { index, source })?;
                Ok(LabeledImage { kind, png_base64 })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(entries: &[&str]) -> ProcessingResponse {
        ProcessingResponse {
            processed_results: entries.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn labels_follow_wire_order() {
        let labeled = response(&["aGVsbG8=", "d29ybGQ=", "IQ=="])
            .into_labeled()
            .unwrap();

        let labels: Vec<String> = labeled.iter().map(|r| r.kind.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "Segmentation Result",
                "Detection Result",
                "Classification Result"
            ]
        );
        assert_eq!(labeled[0].png_base64, "aGVsbG8=");
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let err = response(&["aGVsbG8="]).into_labeled().unwrap_err();
        match err {
            ResponseError::UnexpectedCount { expected, actual } => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = response(&["aGVsbG8=", "not base64!!!", "IQ=="])
            .into_labeled()
            .unwrap_err();
        match err {
            ResponseError::InvalidEncoding { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn deserializes_the_service_payload() {
        let parsed: ProcessingResponse =
            serde_json::from_str(r#"{"processedResults": ["aGVsbG8=", "d29ybGQ=", "IQ=="]}"#)
                .unwrap();
        assert_eq!(parsed.processed_results.len(), 3);
        assert!(parsed.into_labeled().is_ok());
    }
}
