//! Path-token-stream consumer, spec.md §6: replays `{cmd, args}` tokens
//! onto a `Shape` the same way the fluent builder would.

use pathkit_geom::error::{PathKitError, Result};
use pathkit_geom::math;
use pathkit_path::Shape;

/// One parsed path command: a command name paired with its flat argument
/// list, interpreted identically to the fluent `Shape` builder calls.
#[derive(Clone, Debug, PartialEq)]
pub struct PathToken {
    pub cmd: String,
    pub args: Vec<f64>,
}

fn args(token: &PathToken, n: usize) -> Result<&[f64]> {
    if token.args.len() != n {
        return Err(PathKitError::invalid_geometry(format!(
            "`{}` expects {} argument(s), got {}",
            token.cmd,
            n,
            token.args.len()
        )));
    }
    Ok(&token.args)
}

/// Replays a token stream onto a fresh `Shape`, in order.
pub fn parse_tokens(tokens: &[PathToken]) -> Result<Shape> {
    let mut shape = Shape::new();
    for token in tokens {
        match token.cmd.as_str() {
            "moveTo" => {
                let a = args(token, 2)?;
                shape.move_to(math::point(a[0], a[1]));
            }
            "lineTo" => {
                let a = args(token, 2)?;
                shape.line_to(math::point(a[0], a[1]))?;
            }
            "quadraticCurveTo" => {
                let a = args(token, 4)?;
                shape.quadratic_curve_to(math::point(a[0], a[1]), math::point(a[2], a[3]))?;
            }
            "cubicCurveTo" => {
                let a = args(token, 6)?;
                shape.cubic_curve_to(math::point(a[0], a[1]), math::point(a[2], a[3]), math::point(a[4], a[5]))?;
            }
            "arc" => {
                let a = args(token, 6)?;
                shape.arc(math::point(a[0], a[1]), a[2], a[3], a[4], a[5] != 0.0)?;
            }
            "ellipticalArc" => {
                let a = args(token, 8)?;
                shape.elliptical_arc(math::point(a[0], a[1]), a[2], a[3], a[4], a[5], a[6], a[7] != 0.0)?;
            }
            "close" => {
                shape.close()?;
            }
            other => {
                return Err(PathKitError::invalid_geometry(format!("unknown path command `{}`", other)));
            }
        }
    }
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(cmd: &str, args: &[f64]) -> PathToken {
        PathToken { cmd: cmd.to_string(), args: args.to_vec() }
    }

    #[test]
    fn replays_a_triangle_and_closes_it() {
        let tokens = vec![
            token("moveTo", &[0.0, 0.0]),
            token("lineTo", &[10.0, 0.0]),
            token("lineTo", &[5.0, 10.0]),
            token("close", &[]),
        ];
        let shape = parse_tokens(&tokens).unwrap();
        assert_eq!(shape.finished_subpaths().len(), 1);
        assert!(shape.finished_subpaths()[0].is_closed());
    }

    #[test]
    fn unknown_command_is_an_invalid_geometry_error() {
        let tokens = vec![token("teleportTo", &[1.0, 2.0])];
        assert!(parse_tokens(&tokens).is_err());
    }

    #[test]
    fn wrong_argument_count_is_rejected() {
        let tokens = vec![token("lineTo", &[1.0])];
        assert!(parse_tokens(&tokens).is_err());
    }
}
