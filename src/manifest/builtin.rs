//! Built-in declarations for the OpenCL backends

use super::{Family, FamilyOutput, KernelSource, Manifest, RawSplice};

/// Namespace of the generated constants
pub const SCOPE: &str = "xlarig";

const CN_DIR: &str = "src/backend/opencl/cl/cn";
const RX_DIR: &str = "src/backend/opencl/cl/rx";

/// The manifest used when no `--manifest` is given
pub fn manifest() -> Manifest {
    Manifest {
        scope: SCOPE.to_string(),
        strict: false,
        families: vec![cn(), cn_r(), cn_gpu(), rx()],
    }
}

fn cn() -> Family {
    Family {
        name: "cn".to_string(),
        dir: CN_DIR.into(),
        header: "cryptonight_cl.h".into(),
        output: FamilyOutput::Single(KernelSource::new("cryptonight_cl", "cryptonight.cl").includes([
            "algorithm.cl",
            "wolf-aes.cl",
            "wolf-skein.cl",
            "jh.cl",
            "blake256.cl",
            "groestl256.cl",
            "fast_int_math_v2.cl",
            "fast_div_heavy.cl",
            "keccak.cl",
        ])),
    }
}

fn cn_r() -> Family {
    Family {
        name: "cn_r".to_string(),
        dir: CN_DIR.into(),
        header: "cryptonight_r_cl.h".into(),
        output: FamilyOutput::Bundle(vec![
            KernelSource::new("cryptonight_r_defines_cl", "cryptonight_r_defines.cl")
                .includes(["wolf-aes.cl"]),
            KernelSource::new("cryptonight_r_cl", "cryptonight_r.cl"),
        ]),
    }
}

fn cn_gpu() -> Family {
    Family {
        name: "cn_gpu".to_string(),
        dir: CN_DIR.into(),
        header: "cryptonight_gpu_cl.h".into(),
        output: FamilyOutput::Single(
            KernelSource::new("cryptonight_gpu_cl", "cryptonight_gpu.cl")
                .includes(["wolf-aes.cl", "keccak.cl"]),
        ),
    }
}

fn rx() -> Family {
    Family {
        name: "rx".to_string(),
        dir: RX_DIR.into(),
        header: "randomx_cl.h".into(),
        output: FamilyOutput::Single(
            KernelSource::new("randomx_cl", "randomx.cl")
                .includes([
                    "../cn/algorithm.cl",
                    "randomx_constants_monero.h",
                    "randomx_constants_wow.h",
                    "randomx_constants_loki.h",
                    "aes.cl",
                    "blake2b.cl",
                    "randomx_vm.cl",
                    "randomx_jit.cl",
                ])
                .splice(RawSplice::after("fillAes1Rx4.cl"))
                .splice(RawSplice::after("blake2b_double_block.cl")),
        ),
    }
}
