//! Pure-Rust Greek Grid → WGS84 conversion (Snyder 1987, USGS formulas).
//!
//! The Greek Grid (GGRS87, EPSG:2100) is a Transverse Mercator projection on
//! the GRS80 ellipsoid with central meridian 24°E, scale factor 0.9996 and a
//! 500 km false easting, combined with a translation-only datum shift to
//! WGS84. The conversion here is the inverse projection followed by that
//! shift, implemented directly (no libproj binding) so the service builds
//! anywhere.

// ── GRS80 ellipsoid (GGRS87 datum) ───────────────────────────────────────

const A: f64 = 6_378_137.0; // semi-major axis (m)
const F: f64 = 1.0 / 298.257_222_101; // flattening
const E2: f64 = 2.0 * F - F * F; // eccentricity squared
const E_PRIME2: f64 = E2 / (1.0 - E2); // second eccentricity squared

// ── Transverse Mercator parameters of the Greek Grid ─────────────────────

const K0: f64 = 0.9996; // scale factor
const LON0_DEG: f64 = 24.0; // central meridian
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING: f64 = 0.0;

// ── GGRS87 → WGS84 datum shift (translation only, rotations zero) ────────

const DX: f64 = -199.87;
const DY: f64 = 74.79;
const DZ: f64 = 246.62;

// ── WGS84 ellipsoid ──────────────────────────────────────────────────────

const A_WGS84: f64 = 6_378_137.0;
const F_WGS84: f64 = 1.0 / 298.257_223_563;
const E2_WGS84: f64 = 2.0 * F_WGS84 - F_WGS84 * F_WGS84;

// ── Public API ───────────────────────────────────────────────────────────

/// Transform one position from the Greek Grid to WGS84 `[lon, lat, ...]`.
///
/// Positions whose first two components already fall within
/// [-180, 180] × [-90, 90] are assumed geographic and returned unchanged,
/// the exact range check the map client depends on. Components beyond the
/// first two (elevation, measures) pass through untouched, and positions
/// with fewer than two components are returned as-is.
///
/// The conversion never fails to the caller: a non-finite result is logged
/// and the input position is returned untransformed.
pub fn transform_position(position: &[f64]) -> Vec<f64> {
    if position.len() < 2 {
        return position.to_vec();
    }

    let (x, y) = (position[0], position[1]);
    if (-180.0..=180.0).contains(&x) && (-90.0..=90.0).contains(&y) {
        // Already in lon/lat range.
        return position.to_vec();
    }

    let (lon, lat) = grid_to_wgs84(x, y);
    if !lon.is_finite() || !lat.is_finite() {
        tracing::error!(
            easting = x,
            northing = y,
            "coordinate transform produced a non-finite result, returning input unchanged"
        );
        return position.to_vec();
    }

    let mut result = Vec::with_capacity(position.len());
    result.push(lon);
    result.push(lat);
    result.extend_from_slice(&position[2..]);
    result
}

/// Grid easting/northing in metres to WGS84 (longitude, latitude) in degrees.
fn grid_to_wgs84(easting: f64, northing: f64) -> (f64, f64) {
    let (lat, lon) = inverse_tmerc(easting, northing);

    // Translate through geocentric coordinates to move between datums.
    let (x, y, z) = geodetic_to_geocentric(lat, lon, A, E2);
    let (lat_wgs, lon_wgs) = geocentric_to_geodetic(x + DX, y + DY, z + DZ, A_WGS84, E2_WGS84);

    (lon_wgs.to_degrees(), lat_wgs.to_degrees())
}

// ── Inverse projection (Snyder 1987, USGS Prof. Paper 1395, pp. 63-64) ───

/// Inverse Transverse Mercator: easting/northing to geodetic (lat, lon) in
/// radians on the GRS80 ellipsoid. Snyder eqs. 8-16 through 8-25; the
/// latitude of origin is the equator, so M₀ = 0.
fn inverse_tmerc(easting: f64, northing: f64) -> (f64, f64) {
    let x = easting - FALSE_EASTING;
    let y = northing - FALSE_NORTHING;

    let m = y / K0;
    let mu = m / (A * (1.0 - E2 / 4.0 - 3.0 * E2 * E2 / 64.0 - 5.0 * E2 * E2 * E2 / 256.0));

    // Footpoint latitude (Snyder eq. 3-26)
    let e1 = (1.0 - (1.0 - E2).sqrt()) / (1.0 + (1.0 - E2).sqrt());
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let sin1 = phi1.sin();
    let cos1 = phi1.cos();
    let tan1 = phi1.tan();

    let c1 = E_PRIME2 * cos1 * cos1;
    let t1 = tan1 * tan1;
    let n1 = A / (1.0 - E2 * sin1 * sin1).sqrt();
    let r1 = A * (1.0 - E2) / (1.0 - E2 * sin1 * sin1).powf(1.5);
    let d = x / (n1 * K0);

    let d2 = d * d;
    let d4 = d2 * d2;
    let d6 = d4 * d2;

    // Latitude (Snyder eq. 8-17)
    let lat = phi1
        - (n1 * tan1 / r1)
            * (d2 / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * E_PRIME2) * d4 / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                    - 252.0 * E_PRIME2
                    - 3.0 * c1 * c1)
                    * d6
                    / 720.0);

    // Longitude (Snyder eq. 8-18)
    let lon = LON0_DEG.to_radians()
        + (d - (1.0 + 2.0 * t1 + c1) * d2 * d / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * E_PRIME2 + 24.0 * t1 * t1)
                * d4
                * d
                / 120.0)
            / cos1;

    (lat, lon)
}

// ── Datum shift helpers ──────────────────────────────────────────────────

/// Geodetic (lat, lon) in radians to geocentric cartesian (x, y, z) in
/// metres, at ellipsoid height zero.
fn geodetic_to_geocentric(lat: f64, lon: f64, a: f64, e2: f64) -> (f64, f64, f64) {
    let n = a / (1.0 - e2 * lat.sin() * lat.sin()).sqrt();
    let x = n * lat.cos() * lon.cos();
    let y = n * lat.cos() * lon.sin();
    let z = n * (1.0 - e2) * lat.sin();
    (x, y, z)
}

/// Geocentric cartesian back to geodetic (lat, lon) in radians, via
/// Bowring's closed-form approximation (sub-millimetre near the surface).
fn geocentric_to_geodetic(x: f64, y: f64, z: f64, a: f64, e2: f64) -> (f64, f64) {
    let b = a * (1.0 - e2).sqrt();
    let ep2 = (a * a - b * b) / (b * b);

    let p = (x * x + y * y).sqrt();
    let theta = (z * a).atan2(p * b);

    let lat = (z + ep2 * b * theta.sin().powi(3)).atan2(p - e2 * a * theta.cos().powi(3));
    let lon = y.atan2(x);

    (lat, lon)
}

// ── Tests ────────────────────────────────────────────────────────────────
