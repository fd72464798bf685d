//! Periodic term tables for the high-precision solar position algorithm.
//!
//! Heliocentric longitude/latitude/radius series and the nutation series
//! from the NREL solar position algorithm report (Reda & Andreas 2004,
//! tables A4.2 and A4.3).

/// One term of a heliocentric periodic series: contributes `a * cos(b + c * jme)`.
#[derive(Copy, Clone)]
pub(crate) struct HelioTerm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

const fn ht(a: f64, b: f64, c: f64) -> HelioTerm {
    HelioTerm { a, b, c }
}

pub(crate) const L0_TERMS: [HelioTerm; 64] = [
    ht(175347046.0, 0.0, 0.0),
    ht(3341656.0, 4.6692568, 6283.07585),
    ht(34894.0, 4.6261, 12566.1517),
    ht(3497.0, 2.7441, 5753.3849),
    ht(3418.0, 2.8289, 3.5231),
    ht(3136.0, 3.6277, 77713.7715),
    ht(2676.0, 4.4181, 7860.4194),
    ht(2343.0, 6.1352, 3930.2097),
    ht(1324.0, 0.7425, 11506.7698),
    ht(1273.0, 2.0371, 529.691),
    ht(1199.0, 1.1096, 1577.3435),
    ht(990.0, 5.233, 5884.927),
    ht(902.0, 2.045, 26.298),
    ht(857.0, 3.508, 398.149),
    ht(780.0, 1.179, 5223.694),
    ht(753.0, 2.533, 5507.553),
    ht(505.0, 4.583, 18849.228),
    ht(492.0, 4.205, 775.523),
    ht(357.0, 2.92, 0.067),
    ht(317.0, 5.849, 11790.629),
    ht(284.0, 1.899, 796.298),
    ht(271.0, 0.315, 10977.079),
    ht(243.0, 0.345, 5486.778),
    ht(206.0, 4.806, 2544.314),
    ht(205.0, 1.869, 5573.143),
    ht(202.0, 2.458, 6069.777),
    ht(156.0, 0.833, 213.299),
    ht(132.0, 3.411, 2942.463),
    ht(126.0, 1.083, 20.775),
    ht(115.0, 0.645, 0.98),
    ht(103.0, 0.636, 4694.003),
    ht(102.0, 0.976, 15720.839),
    ht(102.0, 4.267, 7.114),
    ht(99.0, 6.21, 2146.17),
    ht(98.0, 0.68, 155.42),
    ht(86.0, 5.98, 161000.69),
    ht(85.0, 1.3, 6275.96),
    ht(85.0, 3.67, 71430.7),
    ht(80.0, 1.81, 17260.15),
    ht(79.0, 3.04, 12036.46),
    ht(75.0, 1.76, 5088.63),
    ht(74.0, 3.5, 3154.69),
    ht(74.0, 4.68, 801.82),
    ht(70.0, 0.83, 9437.76),
    ht(62.0, 3.98, 8827.39),
    ht(61.0, 1.82, 7084.9),
    ht(57.0, 2.78, 6286.6),
    ht(56.0, 4.39, 14143.5),
    ht(56.0, 3.47, 6279.55),
    ht(52.0, 0.19, 12139.55),
    ht(52.0, 1.33, 1748.02),
    ht(51.0, 0.28, 5856.48),
    ht(49.0, 0.49, 1194.45),
    ht(41.0, 5.37, 8429.24),
    ht(41.0, 2.4, 19651.05),
    ht(39.0, 6.17, 10447.39),
    ht(37.0, 6.04, 10213.29),
    ht(37.0, 2.57, 1059.38),
    ht(36.0, 1.71, 2352.87),
    ht(36.0, 1.78, 6812.77),
    ht(33.0, 0.59, 17789.85),
    ht(30.0, 0.44, 83996.85),
    ht(30.0, 2.74, 1349.87),
    ht(25.0, 3.16, 4690.48),
];

pub(crate) const L1_TERMS: [HelioTerm; 34] = [
    ht(628331966747.0, 0.0, 0.0),
    ht(206059.0, 2.678235, 6283.07585),
    ht(4303.0, 2.6351, 12566.1517),
    ht(425.0, 1.59, 3.523),
    ht(119.0, 5.796, 26.298),
    ht(109.0, 2.966, 1577.344),
    ht(93.0, 2.59, 18849.23),
    ht(72.0, 1.14, 529.69),
    ht(68.0, 1.87, 398.15),
    ht(67.0, 4.41, 5507.55),
    ht(59.0, 2.89, 5223.69),
    ht(56.0, 2.17, 155.42),
    ht(45.0, 0.4, 796.3),
    ht(36.0, 0.47, 775.52),
    ht(29.0, 2.65, 7.11),
    ht(21.0, 5.34, 0.98),
    ht(19.0, 1.85, 5486.78),
    ht(19.0, 4.97, 213.3),
    ht(17.0, 2.99, 6275.96),
    ht(16.0, 0.03, 2544.31),
    ht(16.0, 1.43, 2146.17),
    ht(15.0, 1.21, 10977.08),
    ht(12.0, 2.83, 1748.02),
    ht(12.0, 3.26, 5088.63),
    ht(12.0, 5.27, 1194.45),
    ht(12.0, 2.08, 4694.0),
    ht(11.0, 0.77, 553.57),
    ht(10.0, 1.3, 6286.6),
    ht(10.0, 4.24, 1349.87),
    ht(9.0, 2.7, 242.73),
    ht(9.0, 5.64, 951.72),
    ht(8.0, 5.3, 2352.87),
    ht(6.0, 2.65, 9437.76),
    ht(6.0, 4.67, 4690.48),
];

pub(crate) const L2_TERMS: [HelioTerm; 20] = [
    ht(52919.0, 0.0, 0.0),
    ht(8720.0, 1.0721, 6283.0758),
    ht(309.0, 0.867, 12566.152),
    ht(27.0, 0.05, 3.52),
    ht(16.0, 5.19, 26.3),
    ht(16.0, 3.68, 155.42),
    ht(10.0, 0.76, 18849.23),
    ht(9.0, 2.06, 77713.77),
    ht(7.0, 0.83, 775.52),
    ht(5.0, 4.66, 1577.34),
    ht(4.0, 1.03, 7.11),
    ht(4.0, 3.44, 5573.14),
    ht(3.0, 5.14, 796.3),
    ht(3.0, 6.05, 5507.55),
    ht(3.0, 1.19, 242.73),
    ht(3.0, 6.12, 529.69),
    ht(3.0, 0.31, 398.15),
    ht(3.0, 2.28, 553.57),
    ht(2.0, 4.38, 5223.69),
    ht(2.0, 3.75, 0.98),
];

pub(crate) const L3_TERMS: [HelioTerm; 7] = [
    ht(289.0, 5.844, 6283.076),
    ht(35.0, 0.0, 0.0),
    ht(17.0, 5.49, 12566.15),
    ht(3.0, 5.2, 155.42),
    ht(1.0, 4.72, 3.52),
    ht(1.0, 5.3, 18849.23),
    ht(1.0, 5.97, 242.73),
];

pub(crate) const L4_TERMS: [HelioTerm; 3] = [
    ht(114.0, 3.142, 0.0),
    ht(8.0, 4.13, 6283.08),
    ht(1.0, 3.84, 12566.15),
];

pub(crate) const L5_TERMS: [HelioTerm; 1] = [ht(1.0, 3.14, 0.0)];

pub(crate) const B0_TERMS: [HelioTerm; 5] = [
    ht(280.0, 3.199, 84334.662),
    ht(102.0, 5.422, 5507.553),
    ht(80.0, 3.88, 5223.69),
    ht(44.0, 3.7, 2352.87),
    ht(32.0, 4.0, 1577.34),
];

pub(crate) const B1_TERMS: [HelioTerm; 2] = [
    ht(9.0, 3.9, 5507.55),
    ht(6.0, 1.73, 5223.69),
];

pub(crate) const R0_TERMS: [HelioTerm; 40] = [
    ht(100013989.0, 0.0, 0.0),
    ht(1670700.0, 3.0984635, 6283.07585),
    ht(13956.0, 3.05525, 12566.1517),
    ht(3084.0, 5.1985, 77713.7715),
    ht(1628.0, 1.1739, 5753.3849),
    ht(1576.0, 2.8469, 7860.4194),
    ht(925.0, 5.453, 11506.77),
    ht(542.0, 4.564, 3930.21),
    ht(472.0, 3.661, 5884.927),
    ht(346.0, 0.964, 5507.553),
    ht(329.0, 5.9, 5223.694),
    ht(307.0, 0.299, 5573.143),
    ht(243.0, 4.273, 11790.629),
    ht(212.0, 5.847, 1577.344),
    ht(186.0, 5.022, 10977.079),
    ht(175.0, 3.012, 18849.228),
    ht(110.0, 5.055, 5486.778),
    ht(98.0, 0.89, 6069.78),
    ht(86.0, 5.69, 15720.84),
    ht(86.0, 1.27, 161000.69),
    ht(65.0, 0.27, 17260.15),
    ht(63.0, 0.92, 529.69),
    ht(57.0, 2.01, 83996.85),
    ht(56.0, 5.24, 71430.7),
    ht(49.0, 3.25, 2544.31),
    ht(47.0, 2.58, 775.52),
    ht(45.0, 5.54, 9437.76),
    ht(43.0, 6.01, 6275.96),
    ht(39.0, 5.36, 4694.0),
    ht(38.0, 2.39, 8827.39),
    ht(37.0, 0.83, 19651.05),
    ht(37.0, 4.9, 12139.55),
    ht(36.0, 1.67, 12036.46),
    ht(35.0, 1.84, 2942.46),
    ht(33.0, 0.24, 7084.9),
    ht(32.0, 0.18, 5088.63),
    ht(32.0, 1.78, 398.15),
    ht(28.0, 1.21, 6286.6),
    ht(28.0, 1.9, 6279.55),
    ht(26.0, 4.59, 10447.39),
];

pub(crate) const R1_TERMS: [HelioTerm; 10] = [
    ht(103019.0, 1.10749, 6283.07585),
    ht(1721.0, 1.0644, 12566.1517),
    ht(702.0, 3.142, 0.0),
    ht(32.0, 1.02, 18849.23),
    ht(31.0, 2.84, 5507.55),
    ht(25.0, 1.32, 5223.69),
    ht(18.0, 1.42, 1577.34),
    ht(10.0, 5.91, 10977.08),
    ht(9.0, 1.42, 6275.96),
    ht(9.0, 0.27, 5486.78),
];

pub(crate) const R2_TERMS: [HelioTerm; 6] = [
    ht(4359.0, 5.7846, 6283.0758),
    ht(124.0, 5.579, 12566.152),
    ht(12.0, 3.14, 0.0),
    ht(9.0, 3.63, 77713.77),
    ht(6.0, 1.87, 5573.14),
    ht(3.0, 5.47, 18849.23),
];

pub(crate) const R3_TERMS: [HelioTerm; 2] = [
    ht(145.0, 4.273, 6283.076),
    ht(7.0, 3.92, 12566.15),
];

pub(crate) const R4_TERMS: [HelioTerm; 1] = [
    ht(4.0, 2.56, 6283.08),
];

/// One row of the nutation series: the argument is the dot product of `y`
/// with the five fundamental arguments X0..X4, in degrees.
#[derive(Copy, Clone)]
pub(crate) struct NutationTerm {
    pub y: [i8; 5],
    pub psi_a: f64,
    pub psi_b: f64,
    pub eps_c: f64,
    pub eps_d: f64,
}

const fn nt(y: [i8; 5], psi_a: f64, psi_b: f64, eps_c: f64, eps_d: f64) -> NutationTerm {
    NutationTerm { y, psi_a, psi_b, eps_c, eps_d }
}

pub(crate) const NUTATION_TERMS: [NutationTerm; 63] = [
    nt([0, 0, 0, 0, 1], -171996.0, -174.2, 92025.0, 8.9),
    nt([-2, 0, 0, 2, 2], -13187.0, -1.6, 5736.0, -3.0),
    nt([0, 0, 0, 2, 2], -2274.0, -0.2, 977.0, -0.0),
    nt([0, 0, 0, 0, 2], 2062.0, 0.2, -895.0, 0.5),
    nt([0, 1, 0, 0, 0], 1426.0, -3.4, 54.0, -0.0),
    nt([0, 0, 1, 0, 0], 712.0, 0.1, -7.0, 0.0),
    nt([-2, 1, 0, 2, 2], -517.0, 1.2, 224.0, -0.0),
    nt([0, 0, 0, 2, 1], -386.0, -0.4, 200.0, 0.0),
    nt([0, 0, 1, 2, 2], -301.0, 0.0, 129.0, -0.0),
    nt([-2, -1, 0, 2, 2], 217.0, -0.5, -95.0, 0.3),
    nt([-2, 0, 1, 0, 0], -158.0, 0.0, 0.0, 0.0),
    nt([-2, 0, 0, 2, 1], 129.0, 0.1, -70.0, 0.0),
    nt([0, 0, -1, 2, 2], 123.0, 0.0, -53.0, 0.0),
    nt([2, 0, 0, 0, 0], 63.0, 0.0, 0.0, 0.0),
    nt([0, 0, 1, 0, 1], 63.0, 0.1, -33.0, 0.0),
    nt([2, 0, -1, 2, 2], -59.0, 0.0, 26.0, 0.0),
    nt([0, 0, -1, 0, 1], -58.0, -0.1, 32.0, 0.0),
    nt([0, 0, 1, 2, 1], -51.0, 0.0, 27.0, 0.0),
    nt([-2, 0, 2, 0, 0], 48.0, 0.0, 0.0, 0.0),
    nt([0, 0, -2, 2, 1], 46.0, 0.0, -24.0, 0.0),
    nt([2, 0, 0, 2, 2], -38.0, 0.0, 16.0, 0.0),
    nt([0, 0, 2, 2, 2], -31.0, 0.0, 13.0, 0.0),
    nt([0, 0, 2, 0, 0], 29.0, 0.0, 0.0, 0.0),
    nt([-2, 0, 1, 2, 2], 29.0, 0.0, -12.0, 0.0),
    nt([0, 0, 0, 2, 0], 26.0, 0.0, 0.0, 0.0),
    nt([-2, 0, 0, 2, 0], -22.0, 0.0, 0.0, 0.0),
    nt([0, 0, -1, 2, 1], 21.0, 0.0, -10.0, 0.0),
    nt([0, 2, 0, 0, 0], 17.0, -0.1, 0.0, 0.0),
    nt([2, 0, -1, 0, 1], 16.0, 0.0, -8.0, 0.0),
    nt([-2, 2, 0, 2, 2], -16.0, 0.1, 7.0, 0.0),
    nt([0, 1, 0, 0, 1], -15.0, 0.0, 9.0, 0.0),
    nt([-2, 0, 1, 0, 1], -13.0, 0.0, 7.0, 0.0),
    nt([0, -1, 0, 0, 1], -12.0, 0.0, 6.0, 0.0),
    nt([0, 0, 2, -2, 0], 11.0, 0.0, 0.0, 0.0),
    nt([2, 0, -1, 2, 1], -10.0, 0.0, 5.0, 0.0),
    nt([2, 0, 1, 2, 2], -8.0, 0.0, 3.0, 0.0),
    nt([0, 1, 0, 2, 2], 7.0, 0.0, -3.0, 0.0),
    nt([-2, 1, 1, 0, 0], -7.0, 0.0, 0.0, 0.0),
    nt([0, -1, 0, 2, 2], -7.0, 0.0, 3.0, 0.0),
    nt([2, 0, 0, 2, 1], -7.0, 0.0, 3.0, 0.0),
    nt([2, 0, 1, 0, 0], 6.0, 0.0, 0.0, 0.0),
    nt([-2, 0, 2, 2, 2], 6.0, 0.0, -3.0, 0.0),
    nt([-2, 0, 1, 2, 1], 6.0, 0.0, -3.0, 0.0),
    nt([2, 0, -2, 0, 1], -6.0, 0.0, 3.0, 0.0),
    nt([2, 0, 0, 0, 1], -6.0, 0.0, 3.0, 0.0),
    nt([0, -1, 1, 0, 0], 5.0, 0.0, 0.0, 0.0),
    nt([-2, -1, 0, 2, 1], -5.0, 0.0, 3.0, 0.0),
    nt([-2, 0, 0, 0, 1], -5.0, 0.0, 3.0, 0.0),
    nt([0, 0, 2, 2, 1], -5.0, 0.0, 3.0, 0.0),
    nt([-2, 0, 2, 0, 1], 4.0, 0.0, 0.0, 0.0),
    nt([-2, 1, 0, 2, 1], 4.0, 0.0, 0.0, 0.0),
    nt([0, 0, 1, -2, 0], 4.0, 0.0, 0.0, 0.0),
    nt([-1, 0, 1, 0, 0], -4.0, 0.0, 0.0, 0.0),
    nt([-2, 1, 0, 0, 0], -4.0, 0.0, 0.0, 0.0),
    nt([1, 0, 0, 0, 0], -4.0, 0.0, 0.0, 0.0),
    nt([0, 0, 1, 2, 0], 3.0, 0.0, 0.0, 0.0),
    nt([0, 0, -2, 2, 2], -3.0, 0.0, 0.0, 0.0),
    nt([-1, -1, 1, 0, 0], -3.0, 0.0, 0.0, 0.0),
    nt([0, 1, 1, 0, 0], -3.0, 0.0, 0.0, 0.0),
    nt([0, -1, 1, 2, 2], -3.0, 0.0, 0.0, 0.0),
    nt([2, -1, -1, 2, 2], -3.0, 0.0, 0.0, 0.0),
    nt([0, 0, 3, 2, 2], -3.0, 0.0, 0.0, 0.0),
    nt([2, -1, 0, 2, 2], -3.0, 0.0, 0.0, 0.0),
];
