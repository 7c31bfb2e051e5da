//! VPC resource handler

use async_trait::async_trait;
use nimbus_api::{entity_gone, CloudApi, CreateVpcParams, ListPublicIpsParams, UpdateVpcParams};
use nimbus_common::error::ResultExt;
use nimbus_common::{Error, FieldType, Result};
use tracing::{debug, info};

use super::Resource;
use crate::data::ResourceData;
use crate::resolver::{self, IdKind};
use crate::schema::{self, FieldSchema};
use crate::tags;

/// Remote tag type for VPCs.
const TAG_TYPE: &str = "Vpc";

static SCHEMA: &[FieldSchema] = &[
    FieldSchema::required("name", FieldType::String),
    FieldSchema::computed("display_text", FieldType::String),
    FieldSchema::required("cidr", FieldType::String).force_new(),
    FieldSchema::required("vpc_offering", FieldType::String).force_new(),
    FieldSchema::computed("network_domain", FieldType::String).force_new(),
    FieldSchema::computed("project", FieldType::String).force_new(),
    FieldSchema::computed("source_nat_ip", FieldType::String),
    FieldSchema::required("zone", FieldType::String).force_new(),
    FieldSchema::optional("tags", FieldType::StringMap),
];

pub struct VpcResource;

#[async_trait]
impl Resource for VpcResource {
    fn type_name() -> &'static str {
        "nimbus_vpc"
    }

    fn schema() -> &'static [FieldSchema] {
        SCHEMA
    }

    async fn create(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let name = d.get_str("name").to_string();

        let vpc_offering_id =
            resolver::resolve_id(api, IdKind::VpcOffering, d.get_str("vpc_offering")).await?;
        let zone_id = resolver::resolve_id(api, IdKind::Zone, d.get_str("zone")).await?;

        let mut params = CreateVpcParams {
            name: name.clone(),
            display_text: d.get_str_ok("display_text").unwrap_or(&name).to_string(),
            cidr: d.get_str("cidr").to_string(),
            vpc_offering_id,
            zone_id,
            ..Default::default()
        };

        if let Some(domain) = d.get_str_ok("network_domain") {
            params.network_domain = Some(domain.to_string());
        }
        params.project_id = resolver::project_id_of(api, d).await?;

        info!(%name, "creating VPC");
        let vpc = api
            .vpcs
            .create(&params)
            .await
            .ctx_with(|| format!("creating VPC {name}"))?;

        d.set_id(&vpc.id);

        tags::set_tags(api, TAG_TYPE, &vpc.id, d)
            .await
            .ctx_with(|| format!("setting tags on VPC {name}"))?;

        Self::read(api, d).await
    }

    async fn read(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        let Some(vpc) = api.vpcs.find(&id, d.get_str_ok("project")).await? else {
            debug!(name = d.get_str("name"), "VPC no longer exists");
            d.clear_id();
            return Ok(());
        };

        d.set("name", vpc.name.as_str());
        d.set("display_text", vpc.display_text.as_str());
        d.set("cidr", vpc.cidr.as_str());
        d.set("network_domain", vpc.network_domain.as_str());
        d.set("tags", tags::to_map(&vpc.tags));

        // The offering name is only available on the offering entity.
        let offering = api
            .vpc_offerings
            .find(&vpc.vpc_offering_id)
            .await?
            .ok_or_else(|| Error::NotFound {
                kind: "vpc_offering",
                name: vpc.vpc_offering_id.clone(),
            })?;

        resolver::set_value_or_id(d, "vpc_offering", &offering.name, &vpc.vpc_offering_id);
        resolver::set_value_or_id(d, "project", &vpc.project, &vpc.project_id);
        resolver::set_value_or_id(d, "zone", &vpc.zone_name, &vpc.zone_id);

        // The source NAT IP is assigned by the platform; discover it by
        // listing the single public IP flagged as source NAT for this VPC.
        let ips = api
            .addresses
            .list(&ListPublicIpsParams {
                vpc_id: Some(id),
                is_source_nat: Some(true),
                project: d.get_str_ok("project").map(str::to_string),
                ..Default::default()
            })
            .await?;

        if ips.len() == 1 {
            d.set("source_nat_ip", ips[0].ip_address.as_str());
        }

        Ok(())
    }

    async fn update(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let id = d.require_id()?.to_string();
        let name = d.get_str("name").to_string();

        if d.has_change("name") {
            let params = UpdateVpcParams {
                id: id.clone(),
                name: Some(name.clone()),
                ..Default::default()
            };
            api.vpcs
                .update(&params)
                .await
                .ctx_with(|| format!("updating the name of VPC {name}"))?;
        }

        if d.has_change("display_text") {
            let display_text = d.get_str_ok("display_text").unwrap_or(&name).to_string();
            let params = UpdateVpcParams {
                id: id.clone(),
                display_text: Some(display_text),
                ..Default::default()
            };
            api.vpcs
                .update(&params)
                .await
                .ctx_with(|| format!("updating the display text of VPC {name}"))?;
        }

        if d.has_change("tags") {
            tags::update_tags(api, TAG_TYPE, &id, d)
                .await
                .ctx_with(|| format!("updating tags on VPC {name}"))?;
        }

        Self::read(api, d).await
    }

    async fn delete(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        info!(name = d.get_str("name"), "deleting VPC");
        if let Err(err) = api.vpcs.delete(&id).await {
            // Deleting a VPC that is already gone is a no-op.
            if entity_gone(&err, &id) {
                return Ok(());
            }
            return Err(err.ctx(format!("deleting VPC {}", d.get_str("name"))));
        }

        Ok(())
    }
}
