use super::expect_intrinsic;
use crate::config::GemvKernel;
use crate::dtype::Intrinsic;
use crate::error::{require, Result};
use crate::params::Params;

/// 8b mac16 over tiles of 128 matrix elements, one tile per `Q`.
pub fn render_mac16(kernel: &GemvKernel, p: &Params) -> Result<String> {
    expect_intrinsic(kernel, &[Intrinsic::Mac16], "int8 mac16 scheme", "mac16")?;
    require(kernel.k == 32, "int8 mac16 expects K==32 (v32 read).")?;
    require(kernel.n == 16, "int8 mac16 expects N==16 lanes.")?;

    let xoffs_lo = p.hex("xoffsets_lo")?;
    let xoffs_hi_or_xstep = p.hex("xoffs_hi_or_xstep")?;
    let xsquare = p.hex("xsquare")?;
    let zstep = p.plain_or("zstep", "2");
    let q_sym = p.plain_or("Q_symbol", "Q");
    let xstride = p.plain_or("xstart_stride", "128");
    let mload = p.plain_or("mload_expr", "(DTYPE*)&matrix[q][0][0]");

    Ok(format!(
        "
void {name}(input_window_{x} * __restrict in,
                        output_window_{y} * __restrict out)
{{
  aie::accum<acc48, DY> acc (aie::zeros<acc48,DY>());
  aie::vector<DTYPE, 32> vx = window_readincr_v32(in);

  for (int q=0; q<{q_sym}; ++q) {{
    aie::vector<int8,128> MQS_concat = aie::load_v<128>({mload});
    int xstart = q * {xstride};
    acc = mac16(
      acc, MQS_concat,
      xstart,
      {xoffs_lo},
      {xoffs_hi_or_xstep},
      {xsquare},
      vx,
      0,
      0x0,
      {zstep}
    );
  }}

  aie::vector<DTYPE, DY> vy = acc.to_vector<DTYPE>();
  window_writeincr(out, vy);
}}",
        name = kernel.kernel_name,
        x = kernel.x_dtype,
        y = kernel.y_dtype,
        q_sym = q_sym,
        mload = mload,
        xstride = xstride,
        xoffs_lo = xoffs_lo,
        xoffs_hi_or_xstep = xoffs_hi_or_xstep,
        xsquare = xsquare,
        zstep = zstep,
    ))
}

/// 8b mac8 in two halves: the input is split by a 32-lane mask, each half is multiplied against
/// the first and second matrix blocks and the 16-bit partial results are added.
pub fn render_mac8(kernel: &GemvKernel, p: &Params) -> Result<String> {
    expect_intrinsic(kernel, &[Intrinsic::Mac8], "int8 mac8 scheme", "mac8")?;
    require(kernel.k == 16, "int8 mac8 expects K==16 (v16 read).")?;
    require(kernel.n == 16, "int8 mac8 expects N==16 (two v8 writes).")?;

    let xoffs = p.hex("xoffsets")?;
    let xstep = p.plain("xstep")?;
    let xsquare = p.hex("xsquare")?;
    let zoffs = p.hex_or("zoffsets", 0);
    let zstep = p.plain_or("zstep", "2");
    let zsquare = p.hex_or("zsquare", 0x3210);
    let first_off = p.plain_or("first_block_off", "0");
    let second_off = p.plain_or("second_block_off", "DX*4");
    let mask32 = p.hex_or("mask32", 0xFFFF_FF00);

    let first = "concat(first_m[0],first_m[1],first_m[2],first_m[3],first_m[4],first_m[5],first_m[6],first_m[7])";
    let second = "concat(second_m[0],second_m[1],second_m[2],second_m[3],second_m[4],second_m[5],second_m[6],second_m[7])";
    let mac = |acc: &str, blocks: &str, start: &str, vx: &str| {
        format!(
            "{acc} = mac8({acc}, {blocks},
              {start}, {xoffs}, {xstep}, {xsquare}, {vx}, 0, {zoffs}, {zstep}, {zsquare});",
            acc = acc,
            blocks = blocks,
            start = start,
            xoffs = xoffs,
            xstep = xstep,
            xsquare = xsquare,
            vx = vx,
            zoffs = zoffs,
            zstep = zstep,
            zsquare = zsquare,
        )
    };

    Ok(format!(
        "
void {name}(input_window_{x} * __restrict in,
                        output_window_{y} * __restrict out)
{{
  aie::accum<acc48, 8> acc1 (aie::zeros<acc48,8>());
  aie::accum<acc48, 8> acc2 (aie::zeros<acc48,8>());
  aie::accum<acc48, 8> acc3 (aie::zeros<acc48,8>());
  aie::accum<acc48, 8> acc4 (aie::zeros<acc48,8>());

  aie::vector<DTYPE,DX> first_m[8];
  aie::vector<DTYPE,DX> second_m[8];

  aie::vector<DTYPE,DX> vx = window_readincr_v16(in);
  aie::vector<DTYPE,DX> v  = aie::zeros<DTYPE,16>();
  aie::vector<DTYPE,DX*2> vv   = concat(vx, v);
  aie::vector<DTYPE,DX*2> vx_1 = aie::zeros<DTYPE,32>();
  aie::vector<DTYPE,DX*2> vx_2 = aie::zeros<DTYPE,32>();

  constexpr aie::mask<32> mask1 = aie::mask<32>({mask32});
  vx_1 = aie::select(vv,   vx_1, mask1);
  vx_2 = aie::select(vx_2, vv,   mask1);

  for (int q=0; q<8; ++q) {{
    first_m[q]  = aie::load_v<DX>((DTYPE*)matrix[q%2] + ({first_off})  + (q/2 * DX));
    second_m[q] = aie::load_v<DX>((DTYPE*)matrix[q%2] + ({second_off}) + (q/2 * DX));
  }}

  {mac1}
  {mac2}
  {mac3}
  {mac4}

  aie::vector<int16, 8> v0 = acc1.to_vector<int16>();
  aie::vector<int16, 8> v1 = acc2.to_vector<int16>();
  aie::vector<int16, 8> v2 = acc3.to_vector<int16>();
  aie::vector<int16, 8> v3 = acc4.to_vector<int16>();

  v1 = add(v0, v1);
  v3 = add(v2, v3);

  window_writeincr(out, v1);
  window_writeincr(out, v3);
}}",
        name = kernel.kernel_name,
        x = kernel.x_dtype,
        y = kernel.y_dtype,
        mask32 = mask32,
        first_off = first_off,
        second_off = second_off,
        mac1 = mac("acc1", first, "0", "vx_1"),
        mac2 = mac("acc2", second, "0", "vx_2"),
        mac3 = mac("acc3", first, "8", "vx_1"),
        mac4 = mac("acc4", second, "8", "vx_2"),
    ))
}
