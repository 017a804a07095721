//! A fixed-body int32 GemV source with compile-time M, K and N, independent of the variant
//! registry. The lmac8 kernel is emitted as `GemV8`, the lmac4 one as `GemV4`.

use crate::dtype::Intrinsic;
use crate::error::{Error, Result};

pub const DEFAULT_OUT_FILE: &str = "gemV_int32.cpp";

const GEMV8: &str = "
void GemV8(
    input_window_int32 * __restrict in,
    output_window_int32 * __restrict out)
{
    aie::accum<acc80, V8> acc1 (aie::zeros<acc80,V8>());
    aie::accum<acc80, V8> acc2 (aie::zeros<acc80,V8>());
    aie::vector<DTYPE,DY> m;
    aie::vector<DTYPE,V8> vx;

    for (int i=0; i < DY/V8; ++i) {
        vx = window_readincr_v8(in);

        for (int j=0; j < V8; ++j) {
            m = aie::load_v<DY>((DTYPE*)(matrix[(V8*i + j)%2][(V8*i + j)/2]));

            acc1 = lmac8(
                acc1,
                m,
                0,
                0x76543210,
                vx,
                j,
                0x0
            );

            acc2 = lmac8(acc2, m, V8, 0x76543210, vx, j, 0x0);
        }
    }

    aie::vector<DTYPE, V8> vy1 = acc1.to_vector<DTYPE>();
    aie::vector<DTYPE, V8> vy2 = acc2.to_vector<DTYPE>();
    window_writeincr(out, vy1);
    window_writeincr(out, vy2);
}
";

const GEMV4: &str = "
void GemV4(
    input_window_int32 * __restrict in,
    output_window_int32 * __restrict out)
{
    aie::accum<acc80, V4> acc1 (aie::zeros<acc80,V4>());
    aie::accum<acc80, V4> acc2 (aie::zeros<acc80,V4>());
    aie::accum<acc80, V4> acc3 (aie::zeros<acc80,V4>());
    aie::accum<acc80, V4> acc4 (aie::zeros<acc80,V4>());
    aie::vector<DTYPE,DY> m[Q];
    aie::vector<DTYPE,V8> vx;
    aie::vector<DTYPE, DY*2> rows;

    for (int i=0; i < DY/V8; ++i) {
        vx = window_readincr_v8(in);

        for (int j=0; j < V4; ++j) {
            for (int q=0; q<Q; q++)
                m[q] = aie::load_v<DY>((DTYPE*)(matrix[q][V4*i + j]));
            rows = concat(MQS);

            acc1 = lmac4(
                acc1,
                rows,
                0,
                0x00003210,
                DY,
                vx,
                j*2,
                0x0,
                1
            );

            acc2 = lmac4(acc2, rows, V4, 0x00003210, DY, vx, j*2, 0x0, 1);
            acc3 = lmac4(acc3, rows, V4*2, 0x00003210, DY, vx, j*2, 0x0, 1);
            acc4 = lmac4(acc4, rows, V4*3, 0x00003210, DY, vx, j*2, 0x0, 1);
        }
    }

    aie::vector<DTYPE, V4> vy1 = acc1.to_vector<DTYPE>();
    aie::vector<DTYPE, V4> vy2 = acc2.to_vector<DTYPE>();
    aie::vector<DTYPE, V4> vy3 = acc3.to_vector<DTYPE>();
    aie::vector<DTYPE, V4> vy4 = acc4.to_vector<DTYPE>();
    window_writeincr(out, vy1);
    window_writeincr(out, vy2);
    window_writeincr(out, vy3);
    window_writeincr(out, vy4);
}
";

fn header(m: usize, k: usize, n: usize) -> String {
    format!(
        "
#include <adf.h>
#include \"aie_api/aie.hpp\"
#include \"aie_api/aie_adf.hpp\"
#include \"matrix.h\"

#ifndef M
#define M {m}
#endif

#ifndef K
#define K {k}
#endif

#ifndef N
#define N {n}
#endif

#define V8 8
#define V4 4
",
        m = m,
        k = k,
        n = n
    )
}

/// Renders the int32 GemV source for `intrinsic`, which must be lmac8 or lmac4.
pub fn render_int32_standalone(intrinsic: Intrinsic, m: usize, k: usize, n: usize) -> Result<String> {
    let body = match intrinsic {
        Intrinsic::Lmac8 => GEMV8,
        Intrinsic::Lmac4 => GEMV4,
        _ => {
            return Err(Error::UnsupportedIntrinsic {
                strategy: "int32 standalone generator",
                supported: "lmac4/lmac8",
            })
        }
    };
    Ok(header(m, k, n) + body)
}
