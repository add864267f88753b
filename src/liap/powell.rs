//! Powell's conjugate-direction minimizer.
//!
//! Derivative-free minimization of an [`Objective`] over `R^n`. Each sweep
//! line-minimizes along every row of the direction set, then tries the
//! net displacement of the sweep as a new direction. Line minimization
//! brackets a minimum by golden-section expansion and then refines it with
//! Brent's parabolic-interpolation method.

use crate::linalg::RectArray;
use crate::liap::objective::Objective;
use crate::liap::status::Status;

const GOLD: f64 = 1.618_034;
const GLIMIT: f64 = 100.0;
const CGOLD: f64 = 0.381_966_0;
const TINY: f64 = 1.0e-20;
const ZEPS: f64 = 1.0e-12;
const ABS_TOL: f64 = 1.0e-25;

/// Caps and tolerances for [`powell`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowellConfig {
    /// Iteration cap for each line minimization.
    pub maxits1: usize,
    /// Relative tolerance for each line minimization.
    pub tol1: f64,
    /// Cap on sweeps.
    pub maxits_n: usize,
    /// Convergence tolerance on the objective value.
    pub tol_n: f64,
    /// Trace level; 2 or more logs every sweep.
    pub trace: u32,
}

impl Default for PowellConfig {
    fn default() -> Self {
        Self {
            maxits1: 100,
            tol1: 2.0e-10,
            maxits_n: 20,
            tol_n: 1.0e-10,
            trace: 0,
        }
    }
}

/// Result of a [`powell`] run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowellOutcome {
    /// Whether a convergence test passed.
    pub converged: bool,
    /// Objective value at the final point.
    pub value: f64,
    /// Sweeps performed.
    pub iterations: usize,
}

/// Minimize `func` starting from `p`, which is overwritten with the best
/// point found.
///
/// The rows of `xi` are the initial search directions; they are updated in
/// place as the method runs, so `xi` must have `p.len()` columns. A run
/// converges when the value drops to `tol_n`, or when a whole sweep improves
/// it by no more than `tol_n` relative to its size. It fails when `maxits_n`
/// sweeps pass without converging or when `status` is cancelled.
pub fn powell<F: Objective + ?Sized>(
    p: &mut [f64],
    xi: &mut RectArray<f64>,
    func: &mut F,
    config: &PowellConfig,
    status: &Status,
) -> PowellOutcome {
    let n = p.len();
    debug_assert_eq!(xi.num_columns(), n, "direction set does not match the point");
    debug_assert_eq!(xi.num_rows(), n, "direction set must be square");

    let mut fret = func.value(p);
    if n == 0 {
        return PowellOutcome {
            converged: true,
            value: fret,
            iterations: 0,
        };
    }

    let mut pt = p.to_vec();
    let mut xit = vec![0.0; n];
    let mut ptt = vec![0.0; n];

    for iter in 1..=config.maxits_n {
        if status.is_cancelled() {
            log::debug!("powell: cancelled before sweep {}", iter);
            return PowellOutcome {
                converged: false,
                value: fret,
                iterations: iter - 1,
            };
        }

        let fp = fret;
        let mut ibig = 0;
        let mut del = 0.0;

        for i in 0..n {
            for (j, x) in xit.iter_mut().enumerate() {
                *x = xi[(i, j)];
            }
            let fptt = fret;
            fret = linmin(p, &mut xit, fret, func, config);
            if (fptt - fret).abs() > del {
                del = (fptt - fret).abs();
                ibig = i;
            }
        }

        if config.trace >= 2 {
            log::trace!("powell: sweep {} value {:e} -> {:e}", iter, fp, fret);
        }

        if fret <= config.tol_n
            || 2.0 * (fp - fret).abs() <= config.tol_n * (fp.abs() + fret.abs()) + ABS_TOL
        {
            return PowellOutcome {
                converged: true,
                value: fret,
                iterations: iter,
            };
        }

        for j in 0..n {
            ptt[j] = 2.0 * p[j] - pt[j];
            xit[j] = p[j] - pt[j];
            pt[j] = p[j];
        }

        let fptt = func.value(&ptt);
        if fptt < fp {
            let t = 2.0 * (fp - 2.0 * fret + fptt) * (fp - fret - del).powi(2)
                - del * (fp - fptt).powi(2);
            if t < 0.0 {
                fret = linmin(p, &mut xit, fret, func, config);
                let last = n - 1;
                for (j, &x) in xit.iter().enumerate() {
                    xi[(ibig, j)] = xi[(last, j)];
                    xi[(last, j)] = x;
                }
            }
        }
    }

    PowellOutcome {
        converged: false,
        value: fret,
        iterations: config.maxits_n,
    }
}

/// Minimize along `xi` from `p`. On return `p` holds the minimizer and `xi`
/// the displacement taken. Zero directions are skipped.
fn linmin<F: Objective + ?Sized>(
    p: &mut [f64],
    xi: &mut [f64],
    fstart: f64,
    func: &mut F,
    config: &PowellConfig,
) -> f64 {
    if xi.iter().all(|&x| x == 0.0) {
        return fstart;
    }

    let origin = p.to_vec();
    let mut scratch = vec![0.0; p.len()];
    let mut f1dim = |t: f64| {
        for ((s, &o), &d) in scratch.iter_mut().zip(&origin).zip(xi.iter()) {
            *s = o + t * d;
        }
        func.value(&scratch)
    };

    let bracket = mnbrak(0.0, 1.0, fstart, &mut f1dim, config.maxits1);
    let (xmin, fmin) = brent(bracket, &mut f1dim, config.tol1, config.maxits1);

    // Never hand back a worse point than the one we started from.
    if fmin > fstart {
        for d in xi.iter_mut() {
            *d = 0.0;
        }
        return fstart;
    }

    for (x, d) in p.iter_mut().zip(xi.iter_mut()) {
        *d *= xmin;
        *x += *d;
    }
    fmin
}

/// A bracketing triple `a, b, c` with `f(b) <= f(a)` and `f(b) <= f(c)`.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    ax: f64,
    bx: f64,
    cx: f64,
    fb: f64,
}

fn sign(a: f64, b: f64) -> f64 {
    if b >= 0.0 {
        a.abs()
    } else {
        -a.abs()
    }
}

/// Golden-section expansion from `[ax, bx]` until a minimum is bracketed.
/// `fa` is the already-known value at `ax`.
fn mnbrak<G: FnMut(f64) -> f64>(
    mut ax: f64,
    mut bx: f64,
    fa: f64,
    f: &mut G,
    max_steps: usize,
) -> Bracket {
    let mut fa = fa;
    let mut fb = f(bx);
    if fb > fa {
        std::mem::swap(&mut ax, &mut bx);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut cx = bx + GOLD * (bx - ax);
    let mut fc = f(cx);

    let mut steps = 0;
    while fb > fc && steps < max_steps {
        steps += 1;
        let r = (bx - ax) * (fb - fc);
        let q = (bx - cx) * (fb - fa);
        let mut u = bx - ((bx - cx) * q - (bx - ax) * r) / (2.0 * sign((q - r).abs().max(TINY), q - r));
        let ulim = bx + GLIMIT * (cx - bx);
        let mut fu;

        if (bx - u) * (u - cx) > 0.0 {
            fu = f(u);
            if fu < fc {
                return Bracket {
                    ax: bx,
                    bx: u,
                    cx,
                    fb: fu,
                };
            } else if fu > fb {
                return Bracket { ax, bx, cx: u, fb };
            }
            u = cx + GOLD * (cx - bx);
            fu = f(u);
        } else if (cx - u) * (u - ulim) > 0.0 {
            fu = f(u);
            if fu < fc {
                bx = cx;
                cx = u;
                u = cx + GOLD * (cx - bx);
                fb = fc;
                fc = fu;
                fu = f(u);
            }
        } else if (u - ulim) * (ulim - cx) >= 0.0 {
            u = ulim;
            fu = f(u);
        } else {
            u = cx + GOLD * (cx - bx);
            fu = f(u);
        }

        ax = bx;
        bx = cx;
        cx = u;
        fa = fb;
        fb = fc;
        fc = fu;
    }

    if fc < fb {
        // Expansion cap hit while still descending; report the lowest point.
        return Bracket {
            ax: bx,
            bx: cx,
            cx,
            fb: fc,
        };
    }
    Bracket { ax, bx, cx, fb }
}

/// Brent's method on a bracket; returns the best abscissa and its value even
/// when the iteration cap is reached.
fn brent<G: FnMut(f64) -> f64>(bracket: Bracket, f: &mut G, tol: f64, max_steps: usize) -> (f64, f64) {
    let mut a = bracket.ax.min(bracket.cx);
    let mut b = bracket.ax.max(bracket.cx);
    let (mut x, mut w, mut v) = (bracket.bx, bracket.bx, bracket.bx);
    let (mut fx, mut fw, mut fv) = (bracket.fb, bracket.fb, bracket.fb);
    let mut d: f64 = 0.0;
    let mut e: f64 = 0.0;

    for _ in 0..max_steps {
        let xm = 0.5 * (a + b);
        let tol1 = tol * x.abs() + ZEPS;
        let tol2 = 2.0 * tol1;
        if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
            break;
        }

        if e.abs() > tol1 {
            let r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let etemp = e;
            e = d;
            if p.abs() >= (0.5 * q * etemp).abs() || p <= q * (a - x) || p >= q * (b - x) {
                e = if x >= xm { a - x } else { b - x };
                d = CGOLD * e;
            } else {
                d = p / q;
                let u = x + d;
                if u - a < tol2 || b - u < tol2 {
                    d = sign(tol1, xm - x);
                }
            }
        } else {
            e = if x >= xm { a - x } else { b - x };
            d = CGOLD * e;
        }

        let u = if d.abs() >= tol1 { x + d } else { x + sign(tol1, d) };
        let fu = f(u);

        if fu <= fx {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            w = x;
            x = u;
            fv = fw;
            fw = fx;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                w = u;
                fv = fw;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }
    (x, fx)
}
