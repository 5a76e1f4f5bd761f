//! Fixed filter bank: three 101-tap program filters and three 13-tap
//! envelope filters, one of each per band.
//!
//! The program filters are linear-phase (symmetric) designs; any subset of
//! them can be summed into a single combined response, which is equivalent
//! to running the selected filters in parallel and mixing their outputs.

#![allow(clippy::excessive_precision)]

use crate::constants::{ENVELOPE_TAPS, FIR_TAPS};

/// Frequency band of a filter or indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Low = 0,
    /// The band-pass region.
    Mid = 1,
    High = 2,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Low, Band::Mid, Band::High];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Per-band enable flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BandFlags {
    pub low: bool,
    pub mid: bool,
    pub high: bool,
}

impl BandFlags {
    pub const NONE: BandFlags = BandFlags {
        low: false,
        mid: false,
        high: false,
    };

    pub const fn is_set(&self, band: Band) -> bool {
        match band {
            Band::Low => self.low,
            Band::Mid => self.mid,
            Band::High => self.high,
        }
    }

    pub const fn is_empty(&self) -> bool {
        !(self.low || self.mid || self.high)
    }
}

/// Immutable coefficient tables for every band.
pub struct FilterBank {
    program: [[f32; FIR_TAPS]; 3],
    envelope: [[f32; ENVELOPE_TAPS]; 3],
}

impl FilterBank {
    /// The compiled-in filter set.
    pub const STANDARD: FilterBank = FilterBank {
        program: [LOW_PASS, BAND_PASS, HIGH_PASS],
        envelope: [LOW_ENVELOPE, MID_ENVELOPE, HIGH_ENVELOPE],
    };

    /// Program filter taps for `band`.
    pub fn program(&self, band: Band) -> &[f32; FIR_TAPS] {
        &self.program[band.index()]
    }

    /// Envelope filter taps for `band`.
    pub fn envelope(&self, band: Band) -> &[f32; ENVELOPE_TAPS] {
        &self.envelope[band.index()]
    }

    /// Write the elementwise sum of the enabled program filters into `out`.
    ///
    /// With no band enabled `out` is all zeros.
    pub fn combine(&self, flags: BandFlags, out: &mut [f32; FIR_TAPS]) {
        out.fill(0.0);
        for band in Band::ALL {
            if flags.is_set(band) {
                for (o, &c) in out.iter_mut().zip(self.program(band).iter()) {
                    *o += c;
                }
            }
        }
    }
}

/// Program low-pass taps.
#[rustfmt::skip]
pub const LOW_PASS: [f32; FIR_TAPS] = [
    0.000794206273044022, 0.000548194416095954, 0.000663759028931897, 0.000730868445533115,
    0.000725042173370078, 0.000625403097601075, 0.000417966493673838, 9.95735925426323e-05,
    -0.000319729398910800, -0.000814113631211842, -0.00134291964974873, -0.00185146995043936,
    -0.00227604976855320, -0.00254877142578663, -0.00260556539105503, -0.00239330106441487,
    -0.00187925585202128, -0.00105780163669138, 4.29242654544079e-05, 0.00135928483246650,
    0.00279201516631559, 0.00421174592220747, 0.00546638622898337, 0.00639450217019192,
    0.00684017826993213, 0.00667108818699390, 0.00579404736101161, 0.00417181129718697,
    0.00183584406187777, -0.00110549621443575, -0.00446772626977129, -0.00799355070314555,
    -0.0113648346373487, -0.0142260751327139, -0.0162041723486797, -0.0169421532171993,
    -0.0161267529445259, -0.0135198182013752, -0.00898349682512086, -0.00250101512389786,
    0.00581172956195405, 0.0157047045708828, 0.0268009604244810, 0.0386166827614341,
    0.0505881284732122, 0.0621078232828363, 0.0725640566815100, 0.0813837006945989,
    0.0880710804968140, 0.0922444628176314, 0.0936628894927666, 0.0922444628176314,
    0.0880710804968140, 0.0813837006945989, 0.0725640566815100, 0.0621078232828363,
    0.0505881284732122, 0.0386166827614341, 0.0268009604244810, 0.0157047045708828,
    0.00581172956195405, -0.00250101512389786, -0.00898349682512086, -0.0135198182013752,
    -0.0161267529445259, -0.0169421532171993, -0.0162041723486797, -0.0142260751327139,
    -0.0113648346373487, -0.00799355070314555, -0.00446772626977129, -0.00110549621443575,
    0.00183584406187777, 0.00417181129718697, 0.00579404736101161, 0.00667108818699390,
    0.00684017826993213, 0.00639450217019192, 0.00546638622898337, 0.00421174592220747,
    0.00279201516631559, 0.00135928483246650, 4.29242654544079e-05, -0.00105780163669138,
    -0.00187925585202128, -0.00239330106441487, -0.00260556539105503, -0.00254877142578663,
    -0.00227604976855320, -0.00185146995043936, -0.00134291964974873, -0.000814113631211842,
    -0.000319729398910800, 9.95735925426323e-05, 0.000417966493673838, 0.000625403097601075,
    0.000725042173370078, 0.000730868445533115, 0.000663759028931897, 0.000548194416095954,
    0.000794206273044022,
];

/// Program band-pass taps.
#[rustfmt::skip]
pub const BAND_PASS: [f32; FIR_TAPS] = [
    -3.44129163333276e-05, -9.55777451440713e-06, 2.64899380714646e-05, 5.55858616219839e-05,
    3.76123224727201e-05, -2.37894569729972e-05, -6.72758486875963e-05, -3.02726953188300e-05,
    7.08690878564160e-05, 0.000131345355737871, 5.67311481966252e-05, -0.000116289533926509,
    -0.000219521231249759, -0.000113433667247428, 0.000135376673604786, 0.000265948932286808,
    7.06744440433403e-05, -0.000338537990629421, -0.000547637061692444, -0.000212085991955519,
    0.000515626914967612, 0.000938423771622001, 0.000297806786620044, -0.00155269478647518,
    -0.00386395990955181, -0.00284323714036927, -0.00500833002678241, -0.00574101906720537,
    -0.00440682620397027, 0.000735045794638078, 0.00809925858140467, 0.0127424168773443,
    0.0110040579026694, 0.00561901315991171, 0.00468191357995884, 0.0132770865785417,
    0.0256501707807756, 0.0279518390867756, 0.0118933403200059, -0.0136292140137046,
    -0.0275398620655114, -0.0175859792010491, 0.00229633694770758, -0.000485843011545146,
    -0.0454831232415294, -0.110965780974025, -0.140265785480084, -0.0854100172458280,
    0.0460340892645079, 0.184341744473006, 0.243276200782189, 0.184341744473006,
    0.0460340892645078, -0.0854100172458280, -0.140265785480084, -0.110965780974025,
    -0.0454831232415294, -0.000485843011545156, 0.00229633694770758, -0.0175859792010492,
    -0.0275398620655114, -0.0136292140137046, 0.0118933403200059, 0.0279518390867756,
    0.0256501707807756, 0.0132770865785417, 0.00468191357995884, 0.00561901315991170,
    0.0110040579026694, 0.0127424168773443, 0.00809925858140467, 0.000735045794638078,
    -0.00440682620397027, -0.00574101906720537, -0.00500833002678241, -0.00284323714036927,
    -0.00386395990955181, -0.00155269478647518, 0.000297806786620044, 0.000938423771622001,
    0.000515626914967613, -0.000212085991955519, -0.000547637061692444, -0.000338537990629421,
    7.06744440433402e-05, 0.000265948932286808, 0.000135376673604786, -0.000113433667247428,
    -0.000219521231249759, -0.000116289533926509, 5.67311481966252e-05, 0.000131345355737871,
    7.08690878564160e-05, -3.02726953188300e-05, -6.72758486875963e-05, -2.37894569729972e-05,
    3.76123224727201e-05, 5.55858616219839e-05, 2.64899380714646e-05, -9.55777451440713e-06,
    -3.44129163333276e-05,
];

/// Program high-pass taps.
#[rustfmt::skip]
pub const HIGH_PASS: [f32; FIR_TAPS] = [
    -3.71378189903913e-06, -0.000385543776213135, -0.000174286613119065, 0.000155157397306870,
    0.000447502003880196, 0.000299012398223559, -0.000291860363810950, -0.000755737883023330,
    -0.000461619506027581, 0.000503496026963570, 0.00118813038360108, 0.000665865452239553,
    -0.000816332162203236, -0.00177382913521060, -0.000911957710963548, 0.00126274639089030,
    0.00254599785197993, 0.00119733493481360, -0.00188298883432695, -0.00354369458049196,
    -0.00151685212622968, 0.00272779656450504, 0.00481532178960400, 0.00186296024772780,
    -0.00386354139677245, -0.00642521516611152, -0.00222550571371127, 0.00538243640005939,
    0.00846605162099258, 0.00259215799409269, -0.00742229885590284, -0.0110854266837481,
    -0.00294952555849002, 0.0102082964516512, 0.0145406925245107, 0.00328346668466473,
    -0.0141499399473485, -0.0193309086282212, -0.00357979828755701, 0.0200969128979563,
    0.0265683984078155, 0.00382562538269158, -0.0301733841938447, -0.0392988908601045,
    -0.00400986239956292, 0.0516171374349632, 0.0697678224436065, 0.00412388283250039,
    -0.135158465095099, -0.277442591451597, 0.662504031041749, -0.277442591451597,
    -0.135158465095099, 0.00412388283250039, 0.0697678224436065, 0.0516171374349632,
    -0.00400986239956292, -0.0392988908601045, -0.0301733841938447, 0.00382562538269158,
    0.0265683984078155, 0.0200969128979563, -0.00357979828755701, -0.0193309086282212,
    -0.0141499399473485, 0.00328346668466473, 0.0145406925245107, 0.0102082964516512,
    -0.00294952555849002, -0.0110854266837481, -0.00742229885590284, 0.00259215799409269,
    0.00846605162099258, 0.00538243640005939, -0.00222550571371127, -0.00642521516611152,
    -0.00386354139677245, 0.00186296024772780, 0.00481532178960400, 0.00272779656450504,
    -0.00151685212622968, -0.00354369458049196, -0.00188298883432695, 0.00119733493481360,
    0.00254599785197993, 0.00126274639089030, -0.000911957710963548, -0.00177382913521060,
    -0.000816332162203236, 0.000665865452239553, 0.00118813038360108, 0.000503496026963570,
    -0.000461619506027581, -0.000755737883023330, -0.000291860363810950, 0.000299012398223559,
    0.000447502003880196, 0.000155157397306870, -0.000174286613119065, -0.000385543776213135,
    -3.71378189903913e-06,
];

/// Low-band envelope taps.
#[rustfmt::skip]
pub const LOW_ENVELOPE: [f32; ENVELOPE_TAPS] = [
    0.127174276079605, 0.0581343489943583, 0.0681122463081755, 0.0766052817881472,
    0.0830675938972334, 0.0871853443909994, 0.0884935091352945, 0.0871853443909994,
    0.0830675938972334, 0.0766052817881472, 0.0681122463081755, 0.0581343489943583,
    0.127174276079605,
];

/// Band-pass envelope taps.
#[rustfmt::skip]
pub const MID_ENVELOPE: [f32; ENVELOPE_TAPS] = [
    0.0109723768383746, -0.0467943943338264, -0.0741398108994016, -0.149777301781025,
    0.117993634189359, 0.192388845547486, 0.294512671843853, 0.192388845547486,
    0.117993634189359, -0.149777301781025, -0.0741398108994016, -0.0467943943338264,
    0.0109723768383746,
];

/// High-band envelope taps.
#[rustfmt::skip]
pub const HIGH_ENVELOPE: [f32; ENVELOPE_TAPS] = [
    -0.0351103427314022, 0.120418583869658, 0.0883153039547716, 0.00865009773730016,
    -0.134411547496756, -0.277541793649009, 0.662413172546772, -0.277541793649009,
    -0.134411547496756, 0.00865009773730016, 0.0883153039547716, 0.120418583869658,
    -0.0351103427314022,
];
