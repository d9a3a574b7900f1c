//! Encoding-agnostic artifact decoding.
//!
//! The tester writes its results file with whatever text encoding the
//! platform felt like that day: UTF-16LE without a BOM, UTF-8 with a
//! BOM, occasionally clean UTF-8. Candidate encodings are tried in a
//! fixed priority order, and an attempt only wins if the decoded text
//! also parses as the artifact document — decode success alone proves
//! nothing, since ASCII JSON "decodes" under UTF-16 into valid
//! garbage.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use thiserror::Error;

use crate::artifact::{ArtifactError, ResultArtifact};

/// Whether a candidate honors a leading byte-order mark during decode.
#[derive(Debug, Clone, Copy)]
enum Bom {
    Honor,
    Ignore,
}

/// Candidate encodings in priority order. Labels follow the
/// producer platform's naming.
const CANDIDATES: &[(&str, &Encoding, Bom)] = &[
    ("utf-16le", UTF_16LE, Bom::Ignore),
    ("utf-8-sig", UTF_8, Bom::Honor),
    ("utf-8", UTF_8, Bom::Ignore),
    ("utf-16be", UTF_16BE, Bom::Ignore),
];

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no candidate encoding produced a parseable document (tried: {})", attempted.join(", "))]
    AllEncodingsFailed { attempted: Vec<String> },

    #[error(transparent)]
    Invalid(#[from] ArtifactError),
}

/// Decodes raw artifact bytes into a validated [`ResultArtifact`].
///
/// Pure function of the input bytes: decoding the same bytes twice
/// yields identical documents. The input file is never modified.
pub fn decode_artifact(bytes: &[u8]) -> Result<ResultArtifact, DecodeError> {
    let mut attempted = Vec::with_capacity(CANDIDATES.len());

    for (label, encoding, bom) in CANDIDATES {
        attempted.push((*label).to_string());

        let (text, had_errors) = match bom {
            Bom::Honor => {
                let (text, _, had_errors) = encoding.decode(bytes);
                (text, had_errors)
            }
            Bom::Ignore => encoding.decode_without_bom_handling(bytes),
        };
        if had_errors {
            continue;
        }

        let cleaned = sanitize(&text);
        if let Ok(artifact) = serde_json::from_str::<ResultArtifact>(&cleaned) {
            // A structurally-valid parse settles the encoding question;
            // semantic validation failures are final, not retryable.
            artifact.validate()?;
            return Ok(artifact);
        }
    }

    Err(DecodeError::AllEncodingsFailed { attempted })
}

/// Strips the padding a wide-character export leaves behind: embedded
/// NULs and any byte-order marks that survived decoding.
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\u{0}' && *c != '\u{feff}')
        .collect()
}
