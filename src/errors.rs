use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoLookupError {
    /// 输入不是合法的 IP 地址，未发起网络请求
    Validation(String),
    /// 网络失败或非 2xx 响应
    Transport(String),
    /// 地址为 bogon（保留/私有地址），没有位置数据
    NoLocation(String),
    /// 持久化内容无法解析
    StorageParse(String),
    FileOperation(String),
    Serialization(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Authentication(String),
    Unauthenticated(String),
    Config(String),
    NotFound(String),
}

impl GeoLookupError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            GeoLookupError::Validation(_) => "E001",
            GeoLookupError::Transport(_) => "E002",
            GeoLookupError::NoLocation(_) => "E003",
            GeoLookupError::StorageParse(_) => "E004",
            GeoLookupError::FileOperation(_) => "E005",
            GeoLookupError::Serialization(_) => "E006",
            GeoLookupError::DatabaseConfig(_) => "E007",
            GeoLookupError::DatabaseConnection(_) => "E008",
            GeoLookupError::DatabaseOperation(_) => "E009",
            GeoLookupError::Authentication(_) => "E010",
            GeoLookupError::Unauthenticated(_) => "E011",
            GeoLookupError::Config(_) => "E012",
            GeoLookupError::NotFound(_) => "E013",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            GeoLookupError::Validation(_) => "Validation Error",
            GeoLookupError::Transport(_) => "Transport Error",
            GeoLookupError::NoLocation(_) => "No Location Data",
            GeoLookupError::StorageParse(_) => "Storage Parse Error",
            GeoLookupError::FileOperation(_) => "File Operation Error",
            GeoLookupError::Serialization(_) => "Serialization Error",
            GeoLookupError::DatabaseConfig(_) => "Database Configuration Error",
            GeoLookupError::DatabaseConnection(_) => "Database Connection Error",
            GeoLookupError::DatabaseOperation(_) => "Database Operation Error",
            GeoLookupError::Authentication(_) => "Authentication Failed",
            GeoLookupError::Unauthenticated(_) => "Not Logged In",
            GeoLookupError::Config(_) => "Configuration Error",
            GeoLookupError::NotFound(_) => "Resource Not Found",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            GeoLookupError::Validation(msg)
            | GeoLookupError::Transport(msg)
            | GeoLookupError::NoLocation(msg)
            | GeoLookupError::StorageParse(msg)
            | GeoLookupError::FileOperation(msg)
            | GeoLookupError::Serialization(msg)
            | GeoLookupError::DatabaseConfig(msg)
            | GeoLookupError::DatabaseConnection(msg)
            | GeoLookupError::DatabaseOperation(msg)
            | GeoLookupError::Authentication(msg)
            | GeoLookupError::Unauthenticated(msg)
            | GeoLookupError::Config(msg)
            | GeoLookupError::NotFound(msg) => msg,
        }
    }

    /// 是否为单次查询的可恢复错误（控制器回到 idle 即可）
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            GeoLookupError::Validation(_)
                | GeoLookupError::Transport(_)
                | GeoLookupError::NoLocation(_)
        )
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI/TUI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GeoLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GeoLookupError {}

// 便捷的构造函数
impl GeoLookupError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::Validation(msg.into())
    }

    pub fn transport<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::Transport(msg.into())
    }

    pub fn no_location<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::NoLocation(msg.into())
    }

    pub fn storage_parse<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::StorageParse(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::Serialization(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::DatabaseOperation(msg.into())
    }

    pub fn authentication<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::Authentication(msg.into())
    }

    pub fn unauthenticated<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::Unauthenticated(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::Config(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::NotFound(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GeoLookupError {
    fn from(err: sea_orm::DbErr) -> Self {
        GeoLookupError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for GeoLookupError {
    fn from(err: std::io::Error) -> Self {
        GeoLookupError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for GeoLookupError {
    fn from(err: serde_json::Error) -> Self {
        GeoLookupError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeoLookupError>;
