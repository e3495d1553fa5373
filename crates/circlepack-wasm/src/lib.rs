use circlepack_core::config::SketchConfig;
use circlepack_core::uniforms::{GpuAnchor, GpuInstance, InstanceUniforms};
use circlepack_core::Sketch;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // A logger is already installed: start ran before
        log::debug!("console logger already initialized");
    }
}

#[wasm_bindgen]
pub struct CirclePackSketch {
    sketch: Sketch,
    uniforms: Vec<InstanceUniforms>,
}

#[wasm_bindgen]
impl CirclePackSketch {
    /// `config_json` is a partial `SketchConfig`; missing fields keep their
    /// defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, config_json: Option<String>) -> Result<CirclePackSketch, JsError> {
        let config = match config_json.as_deref() {
            Some(json) => serde_json::from_str::<SketchConfig>(json)?,
            None => SketchConfig::default(),
        };
        let sketch = Sketch::new(config, seed as u64)?;
        let uniforms = (0..sketch.instances().len())
            .map(|i| sketch.uniforms(i))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "WASM CirclePackSketch created: {} instances x {} anchors",
            sketch.instances().len(),
            sketch.point_count()
        );
        Ok(CirclePackSketch { sketch, uniforms })
    }

    #[wasm_bindgen]
    pub fn single_sphere(seed: u32) -> Result<CirclePackSketch, JsError> {
        let json = serde_json::to_string(&SketchConfig::single_sphere())?;
        Self::new(seed, Some(json))
    }

    #[wasm_bindgen]
    pub fn instance_count(&self) -> usize {
        self.sketch.instances().len()
    }

    /// `POINT_COUNT` to compile the fragment program with.
    #[wasm_bindgen]
    pub fn point_count(&self) -> usize {
        self.sketch.point_count()
    }

    /// Advance every instance to `time` seconds. Returns the time spent in ms.
    #[wasm_bindgen]
    pub fn advance(&mut self, time: f32) -> Result<f32, JsError> {
        let start = js_sys::Date::now();
        self.sketch.advance(time)?;
        self.write_gpu_output();
        let elapsed = js_sys::Date::now() - start;
        Ok(elapsed as f32)
    }

    #[wasm_bindgen]
    pub fn restart(&mut self) {
        self.sketch.restart();
        self.write_gpu_output();
    }

    #[wasm_bindgen]
    pub fn time(&self) -> f32 {
        self.sketch.time()
    }

    #[wasm_bindgen]
    pub fn get_instance_buffer_ptr(&self, index: usize) -> Result<*const f32, JsError> {
        let u = self.uniforms_at(index)?;
        Ok(u.header() as *const GpuInstance as *const f32)
    }

    #[wasm_bindgen]
    pub fn get_instance_buffer_byte_length(&self) -> usize {
        std::mem::size_of::<GpuInstance>()
    }

    #[wasm_bindgen]
    pub fn get_anchor_buffer_ptr(&self, index: usize) -> Result<*const f32, JsError> {
        let u = self.uniforms_at(index)?;
        Ok(u.points().as_ptr() as *const f32)
    }

    #[wasm_bindgen]
    pub fn get_anchor_buffer_byte_length(&self, index: usize) -> Result<usize, JsError> {
        let u = self.uniforms_at(index)?;
        Ok(u.points().len() * std::mem::size_of::<GpuAnchor>())
    }

    #[wasm_bindgen]
    pub fn instance_color(&self, index: usize) -> Result<Vec<f32>, JsError> {
        let params = self.sketch.instance(index)?;
        Ok(params.base_color().to_array().to_vec())
    }

    #[wasm_bindgen]
    pub fn instance_offset(&self, index: usize) -> Result<Vec<f32>, JsError> {
        let params = self.sketch.instance(index)?;
        Ok(params.offset().to_array().to_vec())
    }

    /// RGBA of one fragment of instance `index`.
    #[wasm_bindgen]
    pub fn shade(&self, index: usize, x: f32, y: f32, z: f32) -> Result<Vec<f32>, JsError> {
        let color = self.sketch.shade(index, glam::Vec3::new(x, y, z))?;
        Ok(color.to_array().to_vec())
    }

    /// CPU fallback: RGBA8 equirectangular unwrap of instance `index`.
    #[wasm_bindgen]
    pub fn render_equirect(
        &self,
        index: usize,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, JsError> {
        let fb = self.sketch.render_instance(index, width, height)?;
        Ok(fb.as_bytes().to_vec())
    }
}

impl CirclePackSketch {
    fn uniforms_at(&self, index: usize) -> Result<&InstanceUniforms, JsError> {
        self.uniforms
            .get(index)
            .ok_or_else(|| JsError::new(&format!("no instance {index}")))
    }

    fn write_gpu_output(&mut self) {
        for (u, params) in self.uniforms.iter_mut().zip(self.sketch.instances()) {
            u.sync_time(params);
        }
    }
}
