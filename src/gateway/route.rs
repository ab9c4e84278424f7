//! 게이트웨이 라우트 규칙
//!
//! 경로 패턴은 Ant 스타일 glob을 사용합니다.
//!
//! | 패턴 | 의미 |
//! |------|------|
//! | `*`  | 한 경로 세그먼트 안의 임의 문자열 |
//! | `**` | 0개 이상의 경로 세그먼트 |

use regex::Regex;

use crate::config::RouteRuleConfig;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct RouteRule {
    id: String,
    matcher: Regex,
    upstream: String,
    rewrite: Option<(Regex, String)>,
}

impl RouteRule {
    /// # Errors
    ///
    /// * `AppError::Config` - 패턴이나 rewrite 정규식이 올바르지 않은 경우
    pub fn compile(config: &RouteRuleConfig) -> AppResult<Self> {
        let matcher = Regex::new(&glob_to_regex(&config.pattern)).map_err(|e| {
            AppError::Config(format!("라우트 {} 패턴 오류: {}", config.id, e))
        })?;

        let rewrite = match &config.rewrite {
            Some((pattern, replacement)) => {
                let regex = Regex::new(pattern).map_err(|e| {
                    AppError::Config(format!("라우트 {} rewrite 정규식 오류: {}", config.id, e))
                })?;
                Some((regex, replacement.clone()))
            }
            None => None,
        };

        Ok(Self {
            id: config.id.clone(),
            matcher,
            upstream: config.upstream.trim_end_matches('/').to_string(),
            rewrite,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// rewrite 규칙이 없거나 맞지 않으면 경로를 그대로 돌려줍니다.
    pub fn rewrite(&self, path: &str) -> String {
        match &self.rewrite {
            Some((regex, replacement)) => regex.replace(path, replacement.as_str()).into_owned(),
            None => path.to_string(),
        }
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::from("^");
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix("/**") {
            out.push_str("(?:/.*)?");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("**") {
            out.push_str(".*");
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('*') {
            out.push_str("[^/]*");
            rest = tail;
        } else {
            let ch = rest.chars().next().unwrap_or_default();
            out.push_str(&regex::escape(&ch.to_string()));
            rest = &rest[ch.len_utf8()..];
        }
    }

    out.push('$');
    out
}
