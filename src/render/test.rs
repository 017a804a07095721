use super::standalone::render_int32_standalone;
use super::*;
use crate::dtype::DType;
use crate::params::ParamValue;
use crate::registry;
use std::env;

const GOLDEN_INT16_MAC16: &str = include_str!("golden/kernels_int16_mac16.cc");
const GOLDEN_INT32_LMAC4: &str = include_str!("golden/kernels_int32_lmac4.cc");

fn kernel(dtype: DType, intrinsic: Intrinsic, k: usize) -> GemvKernel {
    KernelConfig::new(dtype, dtype, intrinsic)
        .with_geometry(k, 16)
        .finalize()
        .unwrap()
}

#[test]
fn int16_mac16_matches_golden() {
    let kernels_cc = render_kernels_cc(&kernel(DType::Int16, Intrinsic::Mac16, 16)).unwrap();
    assert_eq!(kernels_cc, GOLDEN_INT16_MAC16);
}

#[test]
fn rendering_is_deterministic() {
    for &(x, z, intrinsic) in registry::keys() {
        assert_eq!(x, z);
        let k = if (x, intrinsic) == (DType::Int8, Intrinsic::Mac16) {
            32
        } else {
            16
        };
        let first = render_kernels_cc(&kernel(x, intrinsic, k)).unwrap();
        let second = render_kernels_cc(&kernel(x, intrinsic, k)).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with(PREAMBLE));

        let (kernels_cc, graph_cpp) =
            render(KernelConfig::new(x, z, intrinsic).with_geometry(k, 16)).unwrap();
        assert_eq!(kernels_cc, first);
        assert_eq!(graph_cpp, render_graph_cpp(&kernel(x, intrinsic, k)));
    }
}

#[test]
fn int16_mac8_uses_xstep() {
    let kernels_cc = render_kernels_cc(&kernel(DType::Int16, Intrinsic::Mac8, 16)).unwrap();
    assert!(kernels_cc
        .contains("acc = mac8(acc, concat(MQS), 0x0, 0x33323130, 16, 0x3120, vx, i, 0x0, 1 );"));
    assert!(kernels_cc.contains("void GemV_int16_int16_Mac8(input_window_int16 * __restrict in,"));
}

#[test]
fn overrides_replace_defaults_in_rendered_text() {
    let cfg = KernelConfig::new(DType::Int16, DType::Int16, Intrinsic::Mac16)
        .with_override("xoffsets_lo", ParamValue::Int(0x7b7a7978))
        .with_override("zstep", ParamValue::Int(2));
    let (kernels_cc, _) = render(cfg).unwrap();
    assert!(kernels_cc.contains(
        "acc = mac16(acc, concat(MQS), 0x0, 0x7b7a7978, 0x77767574, 0x3120, vx, i, 0x0, 0x0, 2 );"
    ));
}

#[test]
fn int32_lmac8_renders_two_halves() {
    let kernels_cc = render_kernels_cc(&kernel(DType::Int32, Intrinsic::Lmac8, 16)).unwrap();
    assert!(kernels_cc.contains("constexpr int V = 8;"));
    assert!(kernels_cc.contains(
        "aie::accum<acc80, V> acc[2] = {aie::zeros<acc80,V>(), aie::zeros<acc80,V>()};"
    ));
    assert!(kernels_cc.contains("acc[1] = lmac8(acc[1], m, 1*V, 0x76543210, vx, j, 0x0);"));
    assert!(kernels_cc.contains("vx = window_readincr_v8(in);"));
    assert!(kernels_cc.contains("window_writeincr(out, vy1);"));
    assert!(!kernels_cc.contains("vy2"));
}

#[test]
fn int32_lmac4_renders_four_quarters() {
    let kernels_cc = render_kernels_cc(&kernel(DType::Int32, Intrinsic::Lmac4, 16)).unwrap();
    assert!(kernels_cc.contains("rows = concat(MQS);"));
    assert!(kernels_cc
        .contains("acc[3] = lmac4(acc[3], rows, 3*V, 0x3210, DY, vx, j*2, 0x0, 1);"));
    assert!(kernels_cc.contains("vx = window_readincr_v4(in);"));
    assert!(kernels_cc.contains("window_writeincr(out, vy3);"));
}

#[test]
fn int32_lmac4_matches_golden() {
    let kernels_cc = render_kernels_cc(&kernel(DType::Int32, Intrinsic::Lmac4, 16)).unwrap();
    assert_eq!(kernels_cc, GOLDEN_INT32_LMAC4);

    // The lane offsets come from the xoffsets parameter
    let cfg = KernelConfig::new(DType::Int32, DType::Int32, Intrinsic::Lmac4)
        .with_override("xoffsets", ParamValue::Int(0x0123));
    let (kernels_cc, _) = render(cfg).unwrap();
    assert_eq!(
        kernels_cc,
        GOLDEN_INT32_LMAC4.replace(", 0x3210, DY,", ", 0x123, DY,")
    );
}

#[test]
fn int8_mac16_renders_tiles() {
    let kernels_cc = render_kernels_cc(&kernel(DType::Int8, Intrinsic::Mac16, 32)).unwrap();
    assert!(kernels_cc.contains("aie::vector<DTYPE, 32> vx = window_readincr_v32(in);"));
    assert!(kernels_cc.contains("aie::load_v<128>((DTYPE*)&matrix[q][0][0]);"));
    assert!(kernels_cc.contains("    int xstart = q * 128;\n"));
    assert!(kernels_cc.contains("      0x33323130,\n      0x20,\n      0x3120,\n"));
}

#[test]
fn int8_mac8_renders_masked_halves() {
    let kernels_cc = render_kernels_cc(&kernel(DType::Int8, Intrinsic::Mac8, 16)).unwrap();
    assert!(kernels_cc.contains("output_window_int16 * __restrict out)"));
    assert!(kernels_cc.contains("aie::mask<32>(0xffffff00);"));
    assert!(kernels_cc.contains("(DTYPE*)matrix[q%2] + (DX*4) + (q/2 * DX)"));
    assert!(kernels_cc.contains(
        "  acc4 = mac8(acc4, concat(second_m[0],second_m[1],second_m[2],second_m[3],second_m[4],second_m[5],second_m[6],second_m[7]),\n              8, 0x3130, 32, 0x3120, vx_2, 0, 0x0, 2, 0x3210);\n"
    ));
}

#[test]
fn strategies_reject_foreign_intrinsics() {
    let lmac4 = kernel(DType::Int32, Intrinsic::Lmac4, 16);
    match Strategy::Int16Scheme.render(&lmac4, &lmac4.params()) {
        Err(Error::UnsupportedIntrinsic { supported, .. }) => assert_eq!(supported, "mac16/mac8"),
        other => panic!("unexpected {:?}", other),
    }
    let mac8 = kernel(DType::Int16, Intrinsic::Mac8, 16);
    assert!(Strategy::Int32Lmac.render(&mac8, &mac8.params()).is_err());
    assert!(Strategy::Int8Mac16.render(&mac8, &mac8.params()).is_err());
}

#[test]
fn strategies_report_missing_params() {
    let lmac8 = kernel(DType::Int32, Intrinsic::Lmac8, 16);
    match Strategy::Int32Lmac.render(&lmac8, &Params::new()) {
        Err(Error::MissingParam(key)) => assert_eq!(key, "V"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn graph_wires_kernel_to_plio_ports() {
    let graph_cpp = render_graph_cpp(&kernel(DType::Int8, Intrinsic::Mac8, 16));
    assert!(graph_cpp.contains("class simpleGraph : public adf::graph {"));
    assert!(graph_cpp.contains("gemv_kernel = kernel::create(GemV_int8_int8_Mac8);"));
    assert!(graph_cpp
        .contains("connect< window<DX*sizeof(int8_t)> >(X.out[0], gemv_kernel.in[0]);"));
    assert!(graph_cpp
        .contains("connect< window<DY*sizeof(int16_t)> >(gemv_kernel.out[0], Y.in[0]);"));
    assert!(graph_cpp.contains("source(gemv_kernel) = \"kernels.cc\";"));
    assert!(graph_cpp.contains("mygraph.run(20);"));

    let graph_cpp = render_graph_cpp(&kernel(DType::Int8, Intrinsic::Mac16, 32));
    assert!(graph_cpp.contains("#define DX 32\n#define DY 16\n"));
}

#[test]
fn header_declares_the_kernel() {
    let kernels_h = render_kernels_h(&kernel(DType::Int32, Intrinsic::Lmac4, 16));
    assert!(kernels_h.contains(
        "void GemV_int32_int32_Lmac4(\n    input_window_int32 * __restrict in,\n    output_window_int32 * __restrict out);"
    ));
}

#[test]
fn write_all_writes_three_sources() {
    let dir = env::temp_dir().join(format!("aie-gemv-render-{}", std::process::id()));
    let kernel = kernel(DType::Int16, Intrinsic::Mac16, 16);
    write_all(&kernel, &dir).unwrap();

    assert_eq!(
        fs::read_to_string(dir.join(KERNELS_CC)).unwrap(),
        GOLDEN_INT16_MAC16
    );
    assert!(dir.join(KERNELS_H).is_file());
    assert_eq!(
        fs::read_to_string(dir.join(GRAPH_CPP)).unwrap(),
        render_graph_cpp(&kernel)
    );
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn standalone_int32_defines_dimensions() {
    let src = render_int32_standalone(Intrinsic::Lmac8, 4, 16, 16).unwrap();
    assert!(src.contains("#ifndef M\n#define M 4\n#endif"));
    assert!(src.contains("#define K 16"));
    assert!(src.contains("void GemV8("));
    assert!(!src.contains("void GemV4("));

    let src = render_int32_standalone(Intrinsic::Lmac4, 1, 8, 8).unwrap();
    assert!(src.contains("void GemV4("));
    assert!(src.contains("acc4 = lmac4(acc4, rows, V4*3, 0x00003210, DY, vx, j*2, 0x0, 1);"));

    assert!(render_int32_standalone(Intrinsic::Mac16, 1, 16, 16).is_err());
}
