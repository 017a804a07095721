use super::expect_intrinsic;
use crate::config::GemvKernel;
use crate::dtype::Intrinsic;
use crate::error::{require, Result};
use crate::params::Params;
use itertools::Itertools;

/// 32b lmac8 (two halves) or lmac4 (four quarters), one accumulator per part.
pub fn render_lmac(kernel: &GemvKernel, p: &Params) -> Result<String> {
    expect_intrinsic(
        kernel,
        &[Intrinsic::Lmac8, Intrinsic::Lmac4],
        "int32 lmac scheme",
        "lmac4/lmac8",
    )?;

    let v = p.count("V")?;
    let parts = p.count("parts")?;
    let xoffs = p.hex("xoffsets")?;
    let acc_tag = p.plain_or("acc_tag", "acc80");
    require(
        kernel.n % v == 0,
        &format!("N must be multiple of {} for lmac{}.", v, v),
    )?;
    require(kernel.n == 16, "This generator expects N==16 for lmac patterns.")?;
    require(
        kernel.k == kernel.n,
        "For int32 lmac, set K==N so input window matches reads.",
    )?;

    let (xbuff_decl, xbuff_fill, call_lines) = if kernel.intrinsic == Intrinsic::Lmac8 {
        (
            "aie::vector<DTYPE, DY> m;".to_owned(),
            "m = aie::load_v<DY>((DTYPE*)(matrix[(V*i + j)%2][(V*i + j)/2]));".to_owned(),
            (0..parts)
                .map(|k| {
                    format!(
                        "acc[{k}] = lmac{v}(acc[{k}], m, {k}*V, {xoffs}, vx, j, 0x0);",
                        k = k,
                        v = v,
                        xoffs = xoffs
                    )
                })
                .join("\n      "),
        )
    } else {
        (
            "aie::vector<DTYPE, DY> m[Q];\n  aie::vector<DTYPE, DY*2> rows;".to_owned(),
            "for (int q=0; q<Q; ++q)
        m[q] = aie::load_v<DY>((DTYPE*)(matrix[q][V*i + j]));
      rows = concat(MQS);"
                .to_owned(),
            (0..parts)
                .map(|k| {
                    format!(
                        "acc[{k}] = lmac{v}(acc[{k}], rows, {k}*V, {xoffs}, DY, vx, j*2, 0x0, 1);",
                        k = k,
                        v = v,
                        xoffs = xoffs
                    )
                })
                .join("\n      "),
        )
    };

    let acc_decl = format!(
        "aie::accum<{tag}, V> acc[{parts}] = {{{zeros}}};",
        tag = acc_tag,
        parts = parts,
        zeros = (0..parts)
            .map(|_| format!("aie::zeros<{},V>()", acc_tag))
            .join(", ")
    );
    let to_vectors = (0..parts)
        .map(|k| {
            format!(
                "aie::vector<DTYPE, V> vy{k} = acc[{k}].to_vector<DTYPE>();",
                k = k
            )
        })
        .join("\n  ");
    let writes = (0..parts)
        .map(|k| format!("window_writeincr(out, vy{});", k))
        .join("\n  ");

    Ok(format!(
        "
void {name}(input_window_{x} * __restrict in,
                        output_window_{y} * __restrict out)
{{
  constexpr int V = {v};
  {acc_decl}
  aie::vector<DTYPE, V>  vx;
  {xbuff_decl}

  for (int i=0; i < DY/V; ++i) {{
    vx = window_readincr_v{v}(in);
    for (int j=0; j < V; ++j) {{
      {xbuff_fill}
      {call_lines}
    }}
  }}

  {to_vectors}
  {writes}
}}",
        name = kernel.kernel_name,
        x = kernel.x_dtype,
        y = kernel.y_dtype,
        v = v,
        acc_decl = acc_decl,
        xbuff_decl = xbuff_decl,
        xbuff_fill = xbuff_fill,
        call_lines = call_lines,
        to_vectors = to_vectors,
        writes = writes,
    ))
}
