//! IP 地址校验
//!
//! 查询前的地址格式检查，刻意保持简单语法：
//! - IPv4：四段十进制（每段 1-3 位数字），数值在 0..=255
//! - IPv6：八段冒号分隔、每段 1-4 位十六进制
//!
//! 不接受 `::` 零压缩写法与内嵌 IPv4 尾部（已知限制）。

/// 判断输入是否为合法的 IPv4 或 IPv6 地址
///
/// 纯函数，对任意字符串输入都有定义；不做 trim，调用方负责清理输入。
pub fn is_valid_address(input: &str) -> bool {
    if input.trim().is_empty() {
        return false;
    }
    is_valid_ipv4(input) || is_valid_ipv6(input)
}

/// 四段十进制，每段数值 0..=255
pub fn is_valid_ipv4(input: &str) -> bool {
    let groups: Vec<&str> = input.split('.').collect();
    if groups.len() != 4 {
        return false;
    }

    groups.iter().all(|group| {
        // 先匹配粗略形状（1-3 位数字），再检查数值范围
        (1..=3).contains(&group.len())
            && group.bytes().all(|b| b.is_ascii_digit())
            && group.parse::<u16>().is_ok_and(|value| value <= 255)
    })
}

/// 八段冒号分隔，每段 1-4 位十六进制
pub fn is_valid_ipv6(input: &str) -> bool {
    let groups: Vec<&str> = input.split(':').collect();
    if groups.len() != 8 {
        return false;
    }

    groups
        .iter()
        .all(|group| (1..=4).contains(&group.len()) && group.bytes().all(|b| b.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ipv4() {
        assert!(is_valid_address("8.8.8.8"));
        assert!(is_valid_address("0.0.0.0"));
        assert!(is_valid_address("255.255.255.255"));
        assert!(is_valid_address("192.168.1.1"));
        // 前导零按数值解析
        assert!(is_valid_address("010.001.000.009"));
    }

    #[test]
    fn test_ipv4_out_of_range() {
        assert!(!is_valid_address("999.1.1.1"));
        assert!(!is_valid_address("256.0.0.1"));
        assert!(!is_valid_address("1.2.3.300"));
    }

    #[test]
    fn test_ipv4_wrong_shape() {
        assert!(!is_valid_address("1.2.3"));
        assert!(!is_valid_address("1.2.3.4.5"));
        assert!(!is_valid_address("1..3.4"));
        assert!(!is_valid_address("1.2.3.4."));
        assert!(!is_valid_address("a.b.c.d"));
        assert!(!is_valid_address("1.2.3.-4"));
        assert!(!is_valid_address("+1.2.3.4"));
        assert!(!is_valid_address("0001.2.3.4"));
        assert!(!is_valid_address(" 8.8.8.8"));
        assert!(!is_valid_address("8.8.8.8 "));
    }

    #[test]
    fn test_valid_ipv6() {
        assert!(is_valid_address("2001:0db8:85a3:0000:0000:8a2e:0370:7334"));
        assert!(is_valid_address("2001:db8:85a3:0:0:8a2e:370:7334"));
        assert!(is_valid_address("FFFF:ffff:AbCd:0:0:0:0:1"));
    }

    #[test]
    fn test_ipv6_limitations() {
        // 零压缩与内嵌 IPv4 不被接受
        assert!(!is_valid_address("::1"));
        assert!(!is_valid_address("2001:db8::1"));
        assert!(!is_valid_address("0:0:0:0:0:ffff:192.168.1.1"));
    }

    #[test]
    fn test_ipv6_wrong_shape() {
        assert!(!is_valid_address("2001:db8:85a3:0:0:8a2e:370"));
        assert!(!is_valid_address("2001:db8:85a3:0:0:8a2e:370:7334:1"));
        assert!(!is_valid_address("2001:db8:85a3:0:0:8a2e:370:73345"));
        assert!(!is_valid_address("2001:db8:85a3:0:0:8a2e:370:zzzz"));
        assert!(!is_valid_address("2001:db8:85a3:0:0:8a2e:370:"));
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("   "));
        assert!(!is_valid_address("\t\n"));
    }

    #[test]
    fn test_garbage() {
        assert!(!is_valid_address("localhost"));
        assert!(!is_valid_address("example.com"));
        assert!(!is_valid_address("8.8.8.8/32"));
        assert!(!is_valid_address("８.８.８.８"));
    }
}
