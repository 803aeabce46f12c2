//! 约定规范定义
//!
//! 隐式绑定依赖的命名约定：参数 `order_context` 对应类型 `OrderContext`。

/// 命名约定规范
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 从完整类型名提取简短名称
    ///
    /// 去掉模块路径、泛型参数、`dyn` 前缀以及附加的 trait 约束，
    /// 例如 `dyn app::orders::OrderContext + Send` 得到 `OrderContext`。
    pub fn short_type_name(full_name: &str) -> &str {
        let name = full_name.trim();
        let name = name.strip_prefix("dyn ").unwrap_or(name);
        let name = name.split(" + ").next().unwrap_or(name);
        let name = name.split('<').next().unwrap_or(name);
        name.rsplit("::").next().unwrap_or(name).trim()
    }

    /// 将蛇形参数名转换为类型名形式
    ///
    /// 每个单词首字母大写并去掉分隔符：`order_context` -> `OrderContext`。
    pub fn to_type_name(parameter_name: &str) -> String {
        parameter_name
            .split(|c: char| c == '_' || c == '-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect()
    }

    /// 将驼峰命名转换为蛇形命名
    pub fn to_snake_case(s: &str) -> String {
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        let mut previous_lower = false;

        while let Some(ch) = chars.next() {
            if ch.is_uppercase() && !result.is_empty() {
                let next_lower = chars.peek().map(|c| c.is_lowercase()).unwrap_or(false);
                if previous_lower || next_lower {
                    result.push('_');
                }
            }
            previous_lower = ch.is_lowercase() || ch.is_ascii_digit();
            result.extend(ch.to_lowercase());
        }

        result
    }

    /// 注册表查找键：只保留字母数字并统一为小写
    ///
    /// 类型名与转换后的参数名使用同一个键，因此大小写不同的两个类型会落到同一键下。
    pub fn lookup_key(name: &str) -> String {
        name.chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// 参数名对应的查找键
    pub fn parameter_lookup_key(parameter_name: &str) -> String {
        Self::lookup_key(&Self::to_type_name(parameter_name))
    }
}
