use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "APP_CONFIG";
/// 覆盖监听端口的环境变量
pub const PORT_ENV: &str = "PORT";

/// 未指定路径时依次查找的配置文件
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["config.toml", "config/config.toml"];

/// 服务配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
    /// 是否启用控制台输出
    pub console_output: bool,
    /// 是否写入按日期分割的日志文件
    pub file_output: bool,
    /// 日志目录
    pub log_path: PathBuf,
    /// 日志文件名前缀
    pub file_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            file_output: false,
            log_path: PathBuf::from("./logs"),
            file_prefix: "welcome-api".to_string(),
        }
    }
}

impl ServerConfig {
    /// 解析监听地址，`bind_address` 支持 IPv4、IPv6 和 `localhost`
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.bind_address.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.bind_address.parse::<IpAddr>().map_err(|e| {
                ConfigError::Validation(format!(
                    "无效的绑定地址 {}: {}",
                    self.bind_address, e
                ))
            })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        // 确保目录存在
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 应用端口覆盖
    pub fn apply_port_override(&mut self, raw: Option<&str>) -> Result<(), ConfigError> {
        if let Some(raw) = raw {
            self.server.port = raw.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("{} 不是有效的端口: {}", PORT_ENV, raw))
            })?;
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.server.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时必须大于0".to_string()));
        }
        self.server.socket_addr()?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }
        if self.logging.file_output && self.logging.file_prefix.is_empty() {
            return Err(ConfigError::Validation("日志文件前缀不能为空".to_string()));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 加载结果，附带实际读取的文件
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` 表示使用默认配置
    pub source: Option<PathBuf>,
}

/// 从文件或默认值加载配置，并应用环境变量覆盖和校验
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    let explicit = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let port = env::var(PORT_ENV).ok();
    load_config_from(Path::new("."), explicit.as_deref(), port.as_deref())
}

/// 在 `base_dir` 下按顺序查找默认配置文件
pub fn find_default_config(base_dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_PATHS
        .iter()
        .map(|p| base_dir.join(p))
        .find(|p| p.is_file())
}

/// `load_config` 的无环境依赖版本
pub fn load_config_from(
    base_dir: &Path,
    explicit: Option<&Path>,
    port_override: Option<&str>,
) -> Result<LoadedConfig, ConfigError> {
    let source = match explicit {
        // 显式指定的文件必须存在
        Some(path) => Some(path.to_path_buf()),
        None => find_default_config(base_dir),
    };

    let mut config = match &source {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    config.apply_port_override(port_override)?;
    config.validate()?;

    Ok(LoadedConfig { config, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.file_output);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = Config::default();
        config.server.bind_address = "not an address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml("[server]\nport = 8081\n").unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = Config::from_toml("[server\nport = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.server.port = 9000;
        config.save_to_file(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.logging.file_prefix, config.logging.file_prefix);
    }

    #[test]
    fn test_port_override() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        Config::default().save_to_file(&config_path).unwrap();

        let loaded = load_config_from(dir.path(), Some(&config_path), Some("4000")).unwrap();
        assert_eq!(loaded.config.server.port, 4000);
        assert_eq!(loaded.source.as_deref(), Some(config_path.as_path()));

        let err = load_config_from(dir.path(), Some(&config_path), Some("abc")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = load_config_from(dir.path(), Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_)));
    }

    #[test]
    fn test_socket_addr() {
        let config = Config::default();
        let addr = config.server.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_socket_addr_accepts_ipv4_ipv6_and_localhost() {
        let mut server = ServerConfig::default();

        server.bind_address = "127.0.0.1".to_string();
        assert_eq!(server.socket_addr().unwrap().to_string(), "127.0.0.1:3000");

        server.bind_address = "::".to_string();
        let addr = server.socket_addr().unwrap();
        assert!(addr.is_ipv6());
        assert!(addr.ip().is_unspecified());
        assert_eq!(addr.to_string(), "[::]:3000");

        server.bind_address = "localhost".to_string();
        assert!(server.socket_addr().unwrap().ip().is_loopback());

        server.bind_address = "300.1.1.1".to_string();
        assert!(matches!(server.socket_addr(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_ipv6_wildcard_passes_validation() {
        let mut config = Config::default();
        config.server.bind_address = "::".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.server.timeout_seconds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_empty_file_prefix_only_matters_with_file_output() {
        let mut config = Config::default();
        config.logging.file_prefix = String::new();
        assert!(config.validate().is_ok());

        config.logging.file_output = true;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_default_lookup_order() {
        let dir = tempdir().unwrap();

        // 没有配置文件时使用默认值
        assert!(find_default_config(dir.path()).is_none());
        let loaded = load_config_from(dir.path(), None, None).unwrap();
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config.server.port, 3000);

        // 只有 config/config.toml
        let nested = dir.path().join("config").join("config.toml");
        let mut nested_config = Config::default();
        nested_config.server.port = 7001;
        nested_config.save_to_file(&nested).unwrap();

        let loaded = load_config_from(dir.path(), None, None).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(nested.as_path()));
        assert_eq!(loaded.config.server.port, 7001);

        // 根目录的 config.toml 优先
        let root = dir.path().join("config.toml");
        let mut root_config = Config::default();
        root_config.server.port = 7002;
        root_config.save_to_file(&root).unwrap();

        let loaded = load_config_from(dir.path(), None, None).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(root.as_path()));
        assert_eq!(loaded.config.server.port, 7002);
    }
}
