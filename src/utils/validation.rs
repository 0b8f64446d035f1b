use crate::utils::error::{Result, ServiceError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ServiceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

/// 上傳檔名的副檔名檢查，大小寫敏感（`.WAV` 不接受）
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    file_name.ends_with(extension)
}

/// 檔名只能是單一路徑元件，不能跳出上傳目錄
pub fn validate_file_name(file_name: &str) -> Result<()> {
    if file_name.contains('/')
        || file_name.contains('\\')
        || file_name.contains('\0')
        || file_name == "."
        || file_name == ".."
    {
        return Err(ServiceError::bad_request("Invalid file name"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("upload.dir", "EDGE/custom_music").is_ok());
        assert!(validate_path("upload.dir", "").is_err());
        assert!(validate_path("upload.dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("upload.max_upload_mb", 5, 1).is_ok());
        assert!(validate_positive_number("upload.max_upload_mb", 0, 1).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("server.service", "media", &["media", "scoring", "all"]).is_ok());
        assert!(validate_one_of("server.service", "audio", &["media", "scoring", "all"]).is_err());
    }

    #[test]
    fn test_has_extension_is_case_sensitive() {
        assert!(has_extension("song.wav", ".wav"));
        assert!(!has_extension("song.WAV", ".wav"));
        assert!(!has_extension("song.mp3", ".wav"));
        assert!(!has_extension("wav", ".wav"));
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("song.wav").is_ok());
        assert!(validate_file_name("../song.wav").is_err());
        assert!(validate_file_name("dir/song.wav").is_err());
        assert!(validate_file_name("..").is_err());
    }
}
