//! 게이트웨이 라우터
//!
//! 규칙은 등록 순서대로 검사하며 처음 맞는 규칙 하나만 사용합니다.

use crate::config::RouteRuleConfig;
use crate::errors::{AppError, AppResult};
use crate::gateway::route::RouteRule;

/// 라우팅 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedRequest {
    pub route_id: String,
    pub upstream_uri: String,
    pub path: String,
}

impl RoutedRequest {
    /// 업스트림으로 보낼 전체 URL
    pub fn target_url(&self, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.upstream_uri, self.path)
        } else {
            format!("{}{}?{}", self.upstream_uri, self.path, query)
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayRouter {
    rules: Vec<RouteRule>,
}

impl GatewayRouter {
    pub fn from_config(rules: &[RouteRuleConfig]) -> AppResult<Self> {
        let rules = rules
            .iter()
            .map(RouteRule::compile)
            .collect::<AppResult<Vec<_>>>()?;

        for rule in &rules {
            log::info!("🧭 라우트 등록: {} → {}", rule.id(), rule.upstream());
        }
        Ok(Self { rules })
    }

    /// 요청 경로를 업스트림 주소와 다시 쓴 경로로 변환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NoRoute` - 맞는 규칙이 없는 경우 (404)
    pub fn route(&self, path: &str) -> AppResult<RoutedRequest> {
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.matches(path))
            .ok_or_else(|| AppError::NoRoute(path.to_string()))?;

        let rewritten = rule.rewrite(path);
        log::debug!("라우팅: {} → {}{} ({})", path, rule.upstream(), rewritten, rule.id());

        Ok(RoutedRequest {
            route_id: rule.id().to_string(),
            upstream_uri: rule.upstream().to_string(),
            path: rewritten,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSource, GatewayConfig};

    fn router() -> GatewayRouter {
        let config = GatewayConfig::from_source(&ConfigSource::from_pairs([(
            "AUTH_SERVICE_URI",
            "http://auth.internal:8081",
        )]));
        GatewayRouter::from_config(&config.routes).unwrap()
    }

    #[test]
    fn test_auth_route_rewrite() {
        let routed = router().route("/api/auth/kakao/token").unwrap();

        assert_eq!(routed.route_id, "auth-service");
        assert_eq!(routed.upstream_uri, "http://auth.internal:8081");
        assert_eq!(routed.path, "/kakao/token");
        assert_eq!(
            routed.target_url("code=abc"),
            "http://auth.internal:8081/kakao/token?code=abc"
        );
    }

    #[test]
    fn test_docs_route_keeps_path() {
        let routed = router().route("/transformer-docs/swagger-ui/index.html").unwrap();

        assert_eq!(routed.route_id, "transformer-service-docs");
        assert_eq!(routed.upstream_uri, "http://transformerservice:9020");
        assert_eq!(routed.path, "/transformer-docs/swagger-ui/index.html");
    }

    #[test]
    fn test_unmatched_path_is_no_route() {
        let result = router().route("/unmapped/path");
        assert!(matches!(result, Err(AppError::NoRoute(_))));
    }
}
