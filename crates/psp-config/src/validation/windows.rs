use psp_common::WindowKind;

use super::helpers::validate_range;
use crate::schema::PspConfig;

pub(super) fn validate_windows(errors: &mut Vec<String>, config: &PspConfig) {
    for kind in WindowKind::ALL {
        let size = config.windows.size_for(kind);
        let key = kind.as_str().replace('-', "_");
        validate_range(
            errors,
            &format!("windows.{key}.width"),
            size.width.into(),
            50,
            4000,
        );
        validate_range(
            errors,
            &format!("windows.{key}.height"),
            size.height.into(),
            50,
            4000,
        );
    }
    validate_range(errors, "windows.margin", config.windows.margin.into(), 0, 200);
}
