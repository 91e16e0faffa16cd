use std::net::IpAddr;

use tokio::net::lookup_host;

use crate::error::ScanError;

/// Turn a hostname or literal address into a single IP.
///
/// Literal addresses are returned unchanged. For names the first IPv4 answer
/// wins, falling back to the first IPv6 answer.
pub async fn resolve(target: &str) -> Result<IpAddr, ScanError> {
    let target = target.trim();
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(ip);
    }
    if target.is_empty() {
        return Err(ScanError::UnresolvableTarget {
            target: target.to_string(),
            source: None,
        });
    }

    let addrs: Vec<IpAddr> = lookup_host((target, 0 /* dummy port */))
        .await
        .map_err(|e| ScanError::UnresolvableTarget {
            target: target.to_string(),
            source: Some(e),
        })?
        .map(|saddr| saddr.ip())
        .collect();

    let ip = addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| ScanError::UnresolvableTarget {
            target: target.to_string(),
            source: None,
        })?;

    log::debug!("resolved `{target}` to {ip}");
    Ok(ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[tokio::test]
    async fn literal_addresses_pass_through() {
        assert_eq!(
            resolve("10.0.0.7").await.unwrap(),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7))
        );
        assert_eq!(resolve("::1").await.unwrap(), IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn empty_target_is_unresolvable() {
        assert!(matches!(
            resolve("  ").await,
            Err(ScanError::UnresolvableTarget { .. })
        ));
    }
}
