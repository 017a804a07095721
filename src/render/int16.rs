use super::expect_intrinsic;
use crate::config::GemvKernel;
use crate::dtype::Intrinsic;
use crate::error::{require, Result};
use crate::params::Params;

/// 16b x 16b mac16/mac8 over the concatenated matrix blocks `MQS`.
pub fn render_scheme(kernel: &GemvKernel, p: &Params) -> Result<String> {
    require(kernel.k == 16, "int16 schemes assume K==16 (v16 read).")?;
    require(kernel.n == 16, "int16 schemes assume N==16 (v16 lanes in acc).")?;
    expect_intrinsic(
        kernel,
        &[Intrinsic::Mac16, Intrinsic::Mac8],
        "int16 scheme",
        "mac16/mac8",
    )?;

    let xstart = p.hex("xstart")?;
    let xoffs_lo = p.hex("xoffsets_lo")?;
    let xsquare = p.hex("xsquare")?;
    let zoffs_lo = p.hex_or("zoffsets_lo", 0);
    let zstep = p.plain_or("zstep", "1");

    let mac_call = if kernel.intrinsic == Intrinsic::Mac16 {
        let xoffs_hi = p.hex("xoffsets_hi")?;
        let zoffs_hi = p.hex_or("zoffsets_hi", 0);
        format!(
            "acc = mac16(acc, concat(MQS), {}, {}, {}, {}, vx, i, {}, {}, {} );",
            xstart, xoffs_lo, xoffs_hi, xsquare, zoffs_lo, zoffs_hi, zstep
        )
    } else {
        let xstep = p.plain("xstep")?;
        format!(
            "acc = mac8(acc, concat(MQS), {}, {}, {}, {}, vx, i, {}, {} );",
            xstart, xoffs_lo, xstep, xsquare, zoffs_lo, zstep
        )
    };

    Ok(format!(
        "
void {name}(input_window_{x} * __restrict in,
                        output_window_{y} * __restrict out)
{{
  aie::accum<acc48, DY> acc (aie::zeros<acc48,DY>());
  aie::vector<DTYPE, DY> m[Q];
  aie::vector<DTYPE, DX> vx = window_readincr_v16(in);

  for (int i=0, id=0; i<DX; i+=Q, id+=DY) {{
    for (int q=0; q<Q; ++q)
      m[q] = aie::load_v<DY>((DTYPE*)matrix[q] + id);

    {mac_call}
  }}

  aie::vector<DTYPE, DY> vy = acc.to_vector<DTYPE>();
  window_writeincr(out, vy);
}}",
        name = kernel.kernel_name,
        x = kernel.x_dtype,
        y = kernel.y_dtype,
        mac_call = mac_call,
    ))
}
