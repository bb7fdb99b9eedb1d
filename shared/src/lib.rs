use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod protocol;
pub mod serde_helper;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const ENVELOPE_SUCCESS_CODE: i64 = 200;

// =========================================================
// 响应信封 (Envelope)
// =========================================================

/// 所有接口统一的 `{code, data, message}` 包装
///
/// `data` 保持为原始 JSON，待确认 `code` 之后再解码为目标类型。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.code == ENVELOPE_SUCCESS_CODE
    }
}

// =========================================================
// 分页 (Paging)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_num: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub const fn new(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num,
            page_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
        }
    }
}

// =========================================================
// 商品 (Products)
// =========================================================

/// 商品上的标签引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTag {
    #[serde(rename = "type")]
    pub tag_type: String,
    pub name: String,
}

/// 商品卡片（列表页）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default, deserialize_with = "serde_helper::string_list")]
    pub product_cover_image_list: Vec<String>,
    #[serde(default, deserialize_with = "serde_helper::opt_string_or_number")]
    pub retail_price: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::opt_string_or_number")]
    pub large_category: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::string_list")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "serde_helper::opt_string_or_number")]
    pub product_status: Option<String>,
    #[serde(default)]
    pub tags: Vec<ProductTag>,
}

impl ProductCard {
    pub fn cover_image(&self) -> Option<&str> {
        self.product_cover_image_list.first().map(String::as_str)
    }
}

/// 商品详情
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub sub_product_name: String,
    #[serde(default, deserialize_with = "serde_helper::opt_string_or_number")]
    pub retail_price: Option<String>,
    #[serde(default)]
    pub product_blurb: String,
    #[serde(default, deserialize_with = "serde_helper::string_list")]
    pub product_cover_image_list: Vec<String>,
    #[serde(default, deserialize_with = "serde_helper::string_map")]
    pub product_parameter: BTreeMap<String, String>,
    #[serde(default)]
    pub designer_introduction: String,
    /// 富文本 HTML
    #[serde(default)]
    pub product_show: String,
    #[serde(default)]
    pub qrcode: Option<String>,
    #[serde(default)]
    pub in_stock_quantity: Option<i64>,
    #[serde(default)]
    pub in_transit_quantity: Option<i64>,
    #[serde(default)]
    pub special_price_quantity: Option<i64>,
}

/// 详情页按固定顺序展示的参数项
pub const PRODUCT_PARAMETER_KEYS: [&str; 6] = ["材质", "尺寸", "光源", "颜色", "品牌国", "原产地"];

impl ProductDetail {
    /// 按 `PRODUCT_PARAMETER_KEYS` 顺序返回存在且非空的参数
    pub fn display_parameters(&self) -> Vec<(&'static str, &str)> {
        PRODUCT_PARAMETER_KEYS
            .iter()
            .filter_map(|key| {
                self.product_parameter
                    .get(*key)
                    .filter(|v| !v.is_empty())
                    .map(|v| (*key, v.as_str()))
            })
            .collect()
    }

    /// 是否有任意库存数量可展示
    pub fn has_stock_info(&self) -> bool {
        self.in_stock_quantity.is_some()
            || self.in_transit_quantity.is_some()
            || self.special_price_quantity.is_some()
    }
}

// =========================================================
// 品牌 (Brands)
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSummary {
    #[serde(deserialize_with = "serde_helper::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub brand_logo: String,
    #[serde(default)]
    pub sub_product_name: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::lenient_bool")]
    pub effective_flag: Option<bool>,
}

impl BrandSummary {
    pub fn is_effective(&self) -> bool {
        self.effective_flag.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDetail {
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub brand_logo: String,
    #[serde(default)]
    pub atlas_link: Option<String>,
    #[serde(default)]
    pub brand_website_link: Option<String>,
    #[serde(default)]
    pub brand_blurb: String,
    #[serde(default, deserialize_with = "serde_helper::string_list")]
    pub atlas_list: Vec<String>,
}

// =========================================================
// 分类与标签 (Taxonomy & Tags)
// =========================================================

/// `pageCode=Classification` 的原始载荷，以大类中文名为键
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationPayload {
    #[serde(default)]
    pub category: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub brand: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub large_category: Vec<String>,
}

/// 标签行 `{type, name, category?}`
///
/// `category` 为适用的大类中文名，可以是单个字符串或列表。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TagRow {
    #[serde(rename = "type", default)]
    pub tag_type: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::string_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "serde_helper::string_list")]
    pub category: Vec<String>,
}

/// `pageCode=Category` 返回的品类条目
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub large_category_label: String,
}

// =========================================================
// 页面配置 (Page configuration)
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub title1: String,
    #[serde(default)]
    pub title2: String,
    #[serde(default)]
    pub title3: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::lenient_bool")]
    pub status: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBanner {
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub introduce: Option<String>,
    #[serde(default)]
    pub designer: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::lenient_bool")]
    pub status: Option<bool>,
}

/// 只有显式 `status: false` 的配置项才被隐藏
pub trait Toggleable {
    fn status(&self) -> Option<bool>;

    fn is_visible(&self) -> bool {
        self.status() != Some(false)
    }
}

impl Toggleable for Banner {
    fn status(&self) -> Option<bool> {
        self.status
    }
}

impl Toggleable for ProductBanner {
    fn status(&self) -> Option<bool> {
        self.status
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomField {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceItem {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub string1: String,
    #[serde(default)]
    pub string2: String,
    #[serde(default)]
    pub string3: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    #[serde(default)]
    pub service_list: Vec<ServiceItem>,
    #[serde(default)]
    pub showroom_image_list: Vec<MediaImage>,
    #[serde(default)]
    pub media_qrcode_list: Vec<MediaImage>,
}

/// 展厅图片与社交媒体二维码
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaImage {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
}

// =========================================================
// 用户与线索 (Users & Leads)
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserInfo {
    /// 导航栏展示用的名称
    pub fn display_name(&self) -> &str {
        self.nick_name
            .as_deref()
            .or(self.username.as_deref())
            .or(self.phone.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationCode {
    /// 图片验证码（data URL 或图片地址）
    #[serde(default)]
    pub verify_images: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_parameters_follow_fixed_order_and_skip_blanks() {
        let detail: ProductDetail = serde_json::from_value(json!({
            "productName": "吊灯",
            "productParameter": { "光源": "LED", "尺寸": "", "材质": "黄铜", "备注": "x" },
            "inStockQuantity": 3
        }))
        .unwrap();

        assert_eq!(detail.display_parameters(), vec![("材质", "黄铜"), ("光源", "LED")]);
        assert!(detail.has_stock_info());
        assert!(!ProductDetail::default().has_stock_info());
    }

    #[test]
    fn company_info_tolerates_missing_lists() {
        let info: CompanyInfo = serde_json::from_value(json!({
            "customFields": [{ "title": "展厅地址", "content": "上海" }],
            "mediaQrcodeList": [{ "url": "/qr.png", "name": "公众号" }]
        }))
        .unwrap();

        assert_eq!(info.custom_fields[0].title, "展厅地址");
        assert!(info.showroom_image_list.is_empty());
        assert_eq!(info.media_qrcode_list[0].name.as_deref(), Some("公众号"));
    }
}
