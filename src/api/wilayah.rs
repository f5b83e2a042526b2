//! Region Reference Data
//!
//! Static `/data/kabupaten/{provinceId}.json` file listing the districts of
//! the configured province.

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::Region;

pub fn kabupaten_path(province_id: &str) -> String {
    format!("/data/kabupaten/{}.json", province_id.trim())
}

pub async fn list_kabupaten(api: &ApiClient, province_id: &str) -> ApiResult<Vec<Region>> {
    api.fetch_static(&kabupaten_path(province_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kabupaten_path() {
        assert_eq!(kabupaten_path("34"), "/data/kabupaten/34.json");
        assert_eq!(kabupaten_path(" 34 "), "/data/kabupaten/34.json");
    }
}
