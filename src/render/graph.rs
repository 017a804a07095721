use super::KERNELS_CC;
use crate::config::GemvKernel;

/// Renders the ADF graph connecting the kernel to the `data/x.txt` and `data/y_sim.txt` ports.
pub fn render_graph_cpp(kernel: &GemvKernel) -> String {
    format!(
        "
#include <adf.h>
#include \"kernels.h\"
#include <vector>

#define DX {k}
#define DY {n}

using namespace adf;

class {graph} : public adf::graph {{
private:
  kernel gemv_kernel;
public:
  input_plio X;
  output_plio Y;

  {graph}() {{
    X = input_plio::create(plio_128_bits, \"data/x.txt\");
    Y = output_plio::create(plio_128_bits, \"data/y_sim.txt\");
    gemv_kernel = kernel::create({name});

    connect< window<DX*sizeof({x}_t)> >(X.out[0], gemv_kernel.in[0]);
    connect< window<DY*sizeof({y}_t)> >(gemv_kernel.out[0], Y.in[0]);

    source(gemv_kernel) = \"{source}\";
    runtime<ratio>(gemv_kernel) = 1.0;
  }}
}};

{graph} mygraph;

int main() {{
  mygraph.init();
  mygraph.run({iterations});
  mygraph.end();
  return 0;
}}
",
        k = kernel.k,
        n = kernel.n,
        graph = kernel.graph_name,
        name = kernel.kernel_name,
        x = kernel.x_dtype,
        y = kernel.y_dtype,
        source = KERNELS_CC,
        iterations = kernel.iterations,
    )
}

/// Renders the declaration of the kernel function the graph includes.
pub fn render_kernels_h(kernel: &GemvKernel) -> String {
    format!(
        "#include \"adf/window/types.h\"

#ifndef FUNCTION_KERNELS_H
#define FUNCTION_KERNELS_H

void {name}(
    input_window_{x} * __restrict in,
    output_window_{y} * __restrict out);

#endif
",
        name = kernel.kernel_name,
        x = kernel.x_dtype,
        y = kernel.y_dtype,
    )
}
