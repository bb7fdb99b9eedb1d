//! 路由定义模块 - 领域模型
//!
//! 纯粹的路径解析，不依赖于 DOM 或 web_sys。

use std::fmt::Display;

/// 导航栏上"设计严选库"的默认大类
pub const DEFAULT_CATALOG_CATEGORY: &str = "lighting";

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    /// 商品目录 `/products/{category}`
    Products { category: String },
    /// 商品详情 `/products/{category}/{id}`
    ProductDetail { category: String, id: String },
    /// 品牌墙
    GlobalFurniture,
    /// 品牌详情 `/brands/detail/{id}`
    BrandDetail { id: String },
    ZSpacePlus,
    About,
    /// 手机号 + 验证码登录
    Auth,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["products", category] => Self::Products {
                category: category.to_string(),
            },
            ["products", category, id] => Self::ProductDetail {
                category: category.to_string(),
                id: id.to_string(),
            },
            ["global-furniture"] => Self::GlobalFurniture,
            ["brands", "detail", id] => Self::BrandDetail { id: id.to_string() },
            ["z-space-plus"] => Self::ZSpacePlus,
            ["about"] => Self::About,
            ["auth"] => Self::Auth,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Products { category } => format!("/products/{category}"),
            Self::ProductDetail { category, id } => format!("/products/{category}/{id}"),
            Self::GlobalFurniture => "/global-furniture".to_string(),
            Self::BrandDetail { id } => format!("/brands/detail/{id}"),
            Self::ZSpacePlus => "/z-space-plus".to_string(),
            Self::About => "/about".to_string(),
            Self::Auth => "/auth".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 已登录用户访问此路由时应离开（登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Auth)
    }

    /// 登录成功后的去处
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }

    pub fn catalog(category: &str) -> Self {
        Self::Products {
            category: category.to_string(),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
