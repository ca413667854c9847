use axum::Json;
use contracts::shared::locations::{Governorate, GOVERNORATES};

/// GET /api/locations
pub async fn list() -> Json<&'static [Governorate]> {
    Json(GOVERNORATES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn all_governorates_are_listed() {
        let Json(all) = list().await;
        assert_eq!(all.len(), 11);
        let value = serde_json::to_value(all).unwrap();
        assert_eq!(value[0]["code"], "muscat");
        assert!(value[0]["wilayats"].as_array().unwrap().len() > 1);
    }
}
