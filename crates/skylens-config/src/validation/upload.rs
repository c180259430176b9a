use crate::schema::{SkylensConfig, MAX_UPLOAD_LIMIT_BYTES};

use super::helpers::validate_range;

pub(crate) fn validate_upload(errors: &mut Vec<String>, config: &SkylensConfig) {
    validate_range(
        errors,
        "upload.max_bytes",
        config.upload.max_bytes,
        1,
        MAX_UPLOAD_LIMIT_BYTES,
    );
}
