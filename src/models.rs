use std::collections::HashMap;
use std::str::FromStr;

/// Absolute screen region handed to the capture backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl FromStr for CaptureRegion {
    type Err = String;

    /// Parses `"x,y,width,height"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected 4 values (x,y,w,h), got {}", parts.len()));
        }
        let x = parts[0]
            .parse::<i32>()
            .map_err(|e| format!("bad x value '{}': {e}", parts[0]))?;
        let y = parts[1]
            .parse::<i32>()
            .map_err(|e| format!("bad y value '{}': {e}", parts[1]))?;
        let width = parts[2]
            .parse::<u32>()
            .map_err(|e| format!("bad width value '{}': {e}", parts[2]))?;
        let height = parts[3]
            .parse::<u32>()
            .map_err(|e| format!("bad height value '{}': {e}", parts[3]))?;
        Ok(CaptureRegion {
            x,
            y,
            width,
            height,
        })
    }
}

/// Parsed state of the poker table from OCR output.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub small_blind: f64,
    pub big_blind: f64,
    pub pot: f64,
    pub stacks: HashMap<String, f64>,
}

/// Table state converted to big blind units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BbState {
    pub pot_bb: f64,
    pub stacks_bb: HashMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_parses_with_spaces() {
        let region: CaptureRegion = "100, 200, 800, 600".parse().unwrap();
        assert_eq!(
            region,
            CaptureRegion {
                x: 100,
                y: 200,
                width: 800,
                height: 600
            }
        );
    }

    #[test]
    fn region_rejects_wrong_arity() {
        assert!("1,2,3".parse::<CaptureRegion>().is_err());
        assert!("1,2,3,4,5".parse::<CaptureRegion>().is_err());
    }

    #[test]
    fn region_rejects_non_numeric() {
        assert!("a,b,c,d".parse::<CaptureRegion>().is_err());
    }
}
