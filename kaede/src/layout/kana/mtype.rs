//! M-type kana tables. One shift plane; each entry is a romaji fragment,
//! shifted entries carry the multi-sound endings.

use super::roma::*;
use super::KanaMatrix;

#[rustfmt::skip]
pub static BASE: KanaMatrix = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [Q, L, J, F, C, 0, 0, M, Y, R, W, P],
    [E, U, I, A, O, 0, 0, K, S, T, N, H],
    [EI, X, V, AI, OU, 0, 0, G, Z, D, TOUTEN, B],
];

#[rustfmt::skip]
pub static SHIFT: KanaMatrix = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [EKI, UKU, IKU, AKU, OKU, 0, 0, MY, XTU, RY, NN, PY],
    [ENN, UNN, INN, ANN, ONN, 0, 0, KY, SY, TY, NY, HY],
    [ETU, UTU, ITU, ATU, OTU, 0, 0, GY, ZY, DY, KUTEN, BY],
];
