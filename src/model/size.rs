const UNITS: [char; 7] = ['B', 'K', 'M', 'G', 'T', 'P', 'E'];

/// Decode a size as printed by `zfs list` into bytes.
///
/// Accepts exact byte counts (`-p` output) and human-readable values with a
/// binary unit suffix (`512K`, `1.23G`). `-`, `none` and anything malformed
/// return `None`.
pub fn decode_size(text: &str) -> Option<u64> {
    let t = text.trim();
    if t.is_empty() || t == "-" || t.eq_ignore_ascii_case("none") {
        return None;
    }

    let split = t
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(t.len());
    let (num, unit) = t.split_at(split);
    if num.is_empty() {
        return None;
    }

    let unit = unit.to_ascii_uppercase();
    let unit = unit
        .strip_suffix("IB")
        .or_else(|| unit.strip_suffix('B').filter(|u| !u.is_empty()))
        .unwrap_or(unit.as_str());
    let exp = match unit {
        "" | "B" => 0,
        "K" => 1,
        "M" => 2,
        "G" => 3,
        "T" => 4,
        "P" => 5,
        "E" => 6,
        _ => return None,
    };
    let scale = 1024u64.pow(exp);

    if num.contains('.') {
        let v: f64 = num.parse().ok()?;
        let bytes = (v * scale as f64).round();
        if !bytes.is_finite() || bytes >= u64::MAX as f64 {
            return None;
        }
        Some(bytes as u64)
    } else {
        num.parse::<u64>().ok()?.checked_mul(scale)
    }
}

/// Render a byte count with binary units, the way `zfs list` prints sizes.
pub fn human_readable(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{}B", bytes);
    }
    let mut num = bytes as f64;
    for unit in UNITS {
        if num < 10.0 {
            return format!("{:.2}{}", num, unit);
        }
        if num < 1024.0 {
            return format!("{:.1}{}", num, unit);
        }
        num /= 1024.0;
    }
    format!("{:.1}Z", num)
}
