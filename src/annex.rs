// irix-assembler/src/annex.rs

use base64::{engine::general_purpose, Engine as _};
use sha1::{Digest, Sha1};
use tracing::info;

use crate::meta::dokpool::DokpoolMeta;
use crate::models::{Annotation, FileEnclosure, FileHash, Report, DOKPOOL_NAMESPACE};

/// Wrap the bound DokpoolMeta tree with a title and free-text body and
/// append it to the report's annotations.
pub fn attach_annotation(report: &mut Report, title: &str, text: &str, meta: Option<DokpoolMeta>) {
    let dokpool_meta = meta.map(|mut m| {
        m.xmlns = Some(DOKPOOL_NAMESPACE.to_string());
        m
    });
    report.annexes.annotations.push(Annotation {
        title: title.to_string(),
        text: text.to_string(),
        dokpool_meta,
    });
}

/// Append a file enclosure: SHA-1 digest over the raw bytes, length in
/// bytes, content carried base64-encoded. No deduplication; call order is
/// preserved.
pub fn attach_file(report: &mut Report, title: &str, bytes: &[u8], mime_type: &str, file_name: &str) {
    let enclosure = FileEnclosure {
        title: title.to_string(),
        mime_type: mime_type.to_string(),
        file_size: bytes.len() as u64,
        file_hash: FileHash {
            algorithm: "SHA-1".to_string(),
            digest: sha1_digest(bytes),
        },
        file_name: file_name.to_string(),
        enclosed_object: general_purpose::STANDARD.encode(bytes),
    };

    info!(
        file_name,
        mime_type,
        file_size = enclosure.file_size,
        sha1 = %enclosure.file_hash.digest,
        "Attached file enclosure"
    );

    report.annexes.file_enclosures.push(enclosure);
}

pub fn sha1_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
